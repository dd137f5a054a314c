/*
 * Content-fetch collaborator surface. The windowing core never calls into
 * this module; it only fixes the interface a fetch backend must provide and
 * carries the pure URL-splitting helpers such a backend needs. Deliberately
 * no network code lives in this crate.
 */

/// Operations a content-fetch backend provides to applications built on the
/// windowing layer. Implementations typically wrap a platform HTTP or
/// embedded-browser facility; all methods take `&mut self` because backends
/// are stateful (current document, open session).
pub trait ContentFetcher {
    /// Points the backend at `url`; retrieval runs in the background.
    fn navigate(&mut self, url: &str);

    /// The HTML body of the current document, or an empty string when no
    /// document has finished loading.
    fn get_html(&mut self) -> String;

    /// Downloads `url` into `local_path`. Returns whether the transfer
    /// completed successfully.
    fn download_file(&mut self, url: &str, local_path: &str) -> bool;

    /// Performs a raw HTTP request and returns the response body, or `None`
    /// when the request could not be completed.
    fn http_request(&mut self, url: &str, method: &str, headers: &[&str]) -> Option<Vec<u8>>;
}

/// The host component of `url`, without scheme, port, or path.
pub fn host_from_url(url: &str) -> &str {
    let after_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host_port = after_scheme.split_once('/').map_or(after_scheme, |(host, _)| host);
    host_port.split_once(':').map_or(host_port, |(host, _)| host)
}

/*
 * The port component of `url`. An explicit port is honored only when a
 * scheme is present; otherwise the scheme default applies (80 for plain
 * HTTP, 443 for everything else). A non-numeric explicit port also falls
 * back to the scheme default.
 */
pub fn port_from_url(url: &str) -> u16 {
    let default = if url.starts_with("http://") { 80 } else { 443 };
    if let Some((_, after_scheme)) = url.split_once("://") {
        let host_port = after_scheme.split_once('/').map_or(after_scheme, |(host, _)| host);
        if let Some((_, port)) = host_port.split_once(':') {
            return port.parse().unwrap_or(default);
        }
    }
    default
}

/// The absolute path component of `url`, `"/"` when the URL has none.
pub fn path_from_url(url: &str) -> String {
    let after_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    match after_scheme.split_once('/') {
        Some((_, path)) => format!("/{path}"),
        None => "/".to_string(),
    }
}
