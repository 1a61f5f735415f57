//! Target platforms and their prepared project layout.

use std::{fmt, path::PathBuf, str::FromStr};

/// Folder holding the runtime's generated scripts, relative to a platform `www/` folder.
const WORKLIGHT_DIR: [&str; 3] = ["plugins", "cordova-plugin-mfp", "worklight"];

/// Mobile platform whose prepared `www/` folder is processed.
///
/// Each platform places its web assets at a fixed location inside the app's
/// `platforms/` folder once the mobile build tool has run its prepare step.
///
/// # Examples
///
/// ```
/// use hybrid_asset_bundler::bundler::Platform;
///
/// let platform: Platform = "android".parse().unwrap();
/// assert_eq!(
///     platform.www_dir(),
///     std::path::Path::new("platforms/android/app/src/main/assets/www"),
/// );
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Platform {
    /// Android, assets under `app/src/main/assets/www`.
    Android,
    /// iOS, assets under `www`.
    Ios,
    /// Windows, assets under `www`.
    Windows,
}

impl Platform {
    /// All supported platforms.
    pub const ALL: [Platform; 3] = [Platform::Android, Platform::Ios, Platform::Windows];

    /// Identifier used on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Windows => "windows",
        }
    }

    /// Platform `www/` folder, relative to the app root.
    pub fn www_dir(&self) -> PathBuf {
        let mut path = PathBuf::from("platforms").join(self.id());
        if *self == Platform::Android {
            path.extend(["app", "src", "main", "assets"]);
        }
        path.join("www")
    }

    /// Folder receiving the generated checksum script, relative to the app root.
    pub fn checksum_artifact_dir(&self) -> PathBuf {
        let mut path = self.www_dir();
        path.extend(WORKLIGHT_DIR);
        path
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        Platform::ALL
            .into_iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| format!("Non existent platform '{id}'"))
    }
}
