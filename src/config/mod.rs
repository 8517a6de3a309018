mod connection;
mod settings;

pub use connection::{NexusConfig, REQUEST_TIMEOUT};
pub use settings::{
    APT_PROXY, AptSettings, CRAN_PROXY, DEFAULT_APT_ALLOWED_ARCHIVES, DEFAULT_APT_DISTRO,
    DEFAULT_APT_REMOTE_URL, PYPI_PROXY, ROLE_DESCRIPTION, ROLE_NAME, repositories,
};
