use std::ffi::OsStr;
use std::process::Command;

use crate::error::{Error, Result};

/// Operating system families that know how to open a URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Unix,
}

impl Platform {
    /// Platform of the running host.
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Maps an OS identifier, as found in `std::env::consts::OS`, to its family.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "macos" => Ok(Self::MacOs),
            "windows" => Ok(Self::Windows),
            "linux" | "android" | "freebsd" | "dragonfly" | "netbsd" | "openbsd" | "solaris"
            | "illumos" => Ok(Self::Unix),
            _ => Err(Error::UnsupportedPlatform { os: os.to_string() }),
        }
    }

    pub const fn launch_spec(self) -> LaunchSpec {
        match self {
            Self::MacOs => LaunchSpec::new("open", &[]),
            Self::Windows => LaunchSpec::new("rundll32", &["url.dll,FileProtocolHandler"]),
            Self::Unix => LaunchSpec::new("xdg-open", &[]),
        }
    }
}

/// Launcher executable and the arguments placed before the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchSpec {
    program: &'static str,
    args: &'static [&'static str],
}

impl LaunchSpec {
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }

    pub const fn program(&self) -> &'static str {
        self.program
    }

    pub const fn args(&self) -> &'static [&'static str] {
        self.args
    }

    /// `program args... target`, with the target passed through untouched.
    pub fn command(&self, target: &OsStr) -> Command {
        let mut cmd = Command::new(self.program);
        cmd.args(self.args).arg(target);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_os_ids_map_to_families() {
        assert_eq!(Platform::from_os("macos").unwrap(), Platform::MacOs);
        assert_eq!(Platform::from_os("windows").unwrap(), Platform::Windows);
        for os in ["linux", "freebsd", "openbsd", "netbsd", "illumos"] {
            assert_eq!(Platform::from_os(os).unwrap(), Platform::Unix, "{os}");
        }
    }

    #[test]
    fn unknown_os_is_unsupported() {
        match Platform::from_os("plan9") {
            Err(Error::UnsupportedPlatform { os }) => assert_eq!(os, "plan9"),
            other => panic!("expected UnsupportedPlatform, got {other:?}"),
        }
    }

    #[test]
    fn launch_specs() {
        let mac = Platform::MacOs.launch_spec();
        assert_eq!((mac.program(), mac.args()), ("open", &[][..]));

        let win = Platform::Windows.launch_spec();
        assert_eq!(win.program(), "rundll32");
        assert_eq!(win.args(), &["url.dll,FileProtocolHandler"]);

        let unix = Platform::Unix.launch_spec();
        assert_eq!((unix.program(), unix.args()), ("xdg-open", &[][..]));
    }

    #[test]
    fn command_appends_target_verbatim() {
        let cmd = Platform::Windows
            .launch_spec()
            .command(OsStr::new("not a uri?&x=1"));
        assert_eq!(cmd.get_program(), "rundll32");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["url.dll,FileProtocolHandler", "not a uri?&x=1"]);
    }

    #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
    #[test]
    fn host_platform_is_supported() {
        assert!(Platform::current().is_ok());
    }
}
