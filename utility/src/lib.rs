mod error;

pub use error::*;

/// default address of a locally running nuclio dashboard
pub const DASHBOARD: &str = "http://127.0.0.1:8070";
/// namespace used when nothing else is configured
pub const DEFAULT_NAMESPACE: &str = "nuclio";

pub fn is_default<T: Default + PartialEq>(t: &T) -> bool {
    *t == Default::default()
}

#[cfg(test)]
mod tests {
    use crate::Error;

    #[test]
    fn test_is_default() {
        assert!(crate::is_default(&String::new()));
        assert!(!crate::is_default(&"nuclio".to_string()));
        assert!(crate::is_default(&0u16));
    }

    #[test]
    fn test_error_messages() {
        let status = Error::Status {
            status: 500,
            body: "boom".into(),
        };
        assert!(format!("{}", status).contains("500"));
        assert!(format!("{}", status).contains("boom"));
        let creation = Error::CreationFailed("build failed".into());
        assert_eq!(format!("{}", creation), "function creation failed: build failed");
    }
}
