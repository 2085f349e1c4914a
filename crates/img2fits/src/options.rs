use std::ffi::OsStr;

/// Extensions picked up when scanning a directory.
pub const DIRECTORY_EXTENSIONS: [&str; 5] = [".jpg", ".heic", ".heif", ".png", ".jpeg"];

/// Every extension the decoder understands.
pub const SUPPORTED_EXTENSIONS: [&str; 7] =
    [".jpg", ".heic", ".heif", ".png", ".jpeg", ".bmp", ".gif"];

/// Case-sensitive file-name suffix filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    suffixes: Vec<String>,
}

impl ExtensionSet {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ExtensionSet {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    /// The directory filter: JPEG, PNG and HEIC/HEIF.
    pub fn directory_default() -> Self {
        Self::new(DIRECTORY_EXTENSIONS)
    }

    /// Directory filter widened to BMP and GIF.
    pub fn all_supported() -> Self {
        Self::new(SUPPORTED_EXTENSIONS)
    }

    /// `true` if `name` ends with one of the suffixes. `photo.JPG` does not
    /// match `.jpg`. Names need not be valid UTF-8.
    pub fn matches(&self, name: impl AsRef<OsStr>) -> bool {
        let name = name.as_ref().as_encoded_bytes();
        self.suffixes.iter().any(|s| name.ends_with(s.as_bytes()))
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::directory_default()
    }
}

/// What to do when a channel file is already on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Abort with an error. Converting the same image twice fails.
    #[default]
    Fail,
    /// Replace the existing file.
    Overwrite,
    /// Leave the existing file and carry on with the next channel.
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub extensions: ExtensionSet,
    pub overwrite: OverwritePolicy,
}

impl ConvertOptions {
    pub fn with_extensions(mut self, extensions: ExtensionSet) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_overwrite(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }
}
