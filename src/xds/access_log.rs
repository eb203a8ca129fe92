//! File access log configuration
//!
//! Every connection manager writes one access log line per request to the
//! proxy's standard output through Envoy's file access logger.

use envoy_types::pb::envoy::config::accesslog::v3::{
    access_log::ConfigType as AccessLogConfigType, AccessLog,
};
use envoy_types::pb::envoy::extensions::access_loggers::file::v3::FileAccessLog;

use crate::xds::filters::encode_any;
use crate::Result;

/// Destination of the default access log
pub const STDOUT_PATH: &str = "/dev/stdout";
pub const FILE_ACCESS_LOG_NAME: &str = "envoy.access_loggers.file";
pub const FILE_ACCESS_LOG_TYPE_URL: &str =
    "type.googleapis.com/envoy.extensions.access_loggers.file.v3.FileAccessLog";

/// Build a file access log writing to `path` with Envoy's default format
pub fn file_access_log(path: &str) -> Result<AccessLog> {
    let file_log = FileAccessLog { path: path.to_string(), access_log_format: None };

    let typed_config = encode_any(FILE_ACCESS_LOG_TYPE_URL, &file_log)?;

    Ok(AccessLog {
        name: FILE_ACCESS_LOG_NAME.to_string(),
        filter: None,
        config_type: Some(AccessLogConfigType::TypedConfig(typed_config)),
    })
}

/// The access log every ingress connection manager carries
pub fn stdout_access_log() -> Result<AccessLog> {
    file_access_log(STDOUT_PATH)
}
