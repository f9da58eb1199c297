use std::path::PathBuf;

/// API base URL baked in at build time via `JOBTRACK_API_URL`.
pub const DEFAULT_API_URL: &str = match option_env!("JOBTRACK_API_URL") {
    Some(url) => url,
    None => "http://localhost:5000",
};

/// Platform data directory for the record store, or `./.jobtrack` if there is none.
pub fn default_data_dir() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "jobtrack") {
        proj_dirs.data_dir().to_path_buf()
    } else {
        PathBuf::from(".jobtrack")
    }
}
