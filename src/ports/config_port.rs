//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// Nullable float: a missing key, empty value, the literal `none`, or an
    /// unparseable value all read as `None`.
    fn get_optional_double(&self, section: &str, key: &str) -> Option<f64> {
        let value = self.get_string(section, key)?;
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return None;
        }
        trimmed.parse().ok()
    }
}
