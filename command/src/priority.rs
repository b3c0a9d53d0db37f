use utility::DEFAULT_NAMESPACE;

pub(crate) const DASHBOARD_URL_ENVIRONMENT: &str = "NUCLIO_DASHBOARD_URL";
pub(crate) const NAMESPACE_ENVIRONMENT: &str = "NUCLIO_NAMESPACE";

/// flag, then environment, then config file, then the default
pub(crate) fn get_dashboard_url(
    argument_url: &str,
    environment_url: &str,
    config_url: &str,
    default_url: &str,
) -> String {
    let dashboard_url = [argument_url, environment_url, config_url]
        .iter()
        .find(|url| !url.is_empty())
        .copied()
        .unwrap_or(default_url);

    let dashboard_url = dashboard_url.trim_end_matches('/');
    if dashboard_url.starts_with("http://") || dashboard_url.starts_with("https://") {
        dashboard_url.to_string()
    } else {
        format!("http://{}", dashboard_url)
    }
}

pub(crate) fn get_namespace(
    flag_namespace: &str,
    environment_namespace: &str,
    config_namespace: &str,
) -> String {
    [flag_namespace, environment_namespace, config_namespace]
        .iter()
        .find(|ns| !ns.is_empty())
        .copied()
        .unwrap_or(DEFAULT_NAMESPACE)
        .to_string()
}
