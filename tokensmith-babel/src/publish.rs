use crate::error::FormatError;
use crate::format::{FormatOptions, RenderContext};
use crate::registry::FormatRegistry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tokensmith_core::TokenBuild;

/// One output file of a platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSpec {
    /// Path relative to the platform's build path
    pub destination: String,
    pub format: String,
    #[serde(default)]
    pub options: FormatOptions,
}

impl FileSpec {
    pub fn new(destination: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            format: format.into(),
            options: FormatOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }
}

/// A named group of files sharing a build path.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformSpec {
    pub name: String,
    pub build_path: PathBuf,
    pub files: Vec<FileSpec>,
}

impl PlatformSpec {
    pub fn new(name: impl Into<String>, build_path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            build_path: build_path.as_ref().to_path_buf(),
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: FileSpec) -> Self {
        self.files.push(file);
        self
    }
}

/// Rendered text of one file, not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub platform: String,
    pub format: String,
    /// `build_path` joined with `destination`
    pub path: PathBuf,
    pub contents: String,
}

/// Renders every file of `platforms`, in order, with formats looked up in `registry`.
///
/// Stops at the first unknown format or render failure.
pub fn render_platforms(
    build: &TokenBuild,
    registry: &FormatRegistry,
    platforms: &[PlatformSpec],
) -> Result<Vec<Artifact>, FormatError> {
    let mut artifacts = Vec::new();
    for platform in platforms {
        for file in &platform.files {
            let format = registry.get(&file.format)?;
            if !has_usual_extension(format.file_extensions(), &file.destination) {
                tracing::warn!(
                    "{}: `{}` does not end in .{}",
                    file.format,
                    file.destination,
                    format.file_extensions().join(" or .")
                );
            }
            let contents = format.render(&RenderContext::new(build, &file.options))?;
            let path = platform.build_path.join(&file.destination);
            tracing::debug!(
                platform = %platform.name,
                format = %file.format,
                bytes = contents.len(),
                "rendered {}",
                path.display()
            );
            artifacts.push(Artifact {
                platform: platform.name.clone(),
                format: file.format.clone(),
                path,
                contents,
            });
        }
    }
    Ok(artifacts)
}

fn has_usual_extension(extensions: &[&str], destination: &str) -> bool {
    extensions.is_empty()
        || Path::new(destination)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&ext))
}

/// Writes artifacts below `root`, creating parent directories. Returns the written paths.
pub fn write_artifacts(artifacts: &[Artifact], root: &Path) -> Result<Vec<PathBuf>, FormatError> {
    artifacts
        .iter()
        .map(|artifact| {
            let path = root.join(&artifact.path);
            write_to_path(&path, artifact.contents.as_bytes())?;
            tracing::info!("wrote {}", path.display());
            Ok(path)
        })
        .collect()
}

fn write_to_path(path: &Path, bytes: &[u8]) -> Result<(), FormatError> {
    let io_err = |source: std::io::Error| FormatError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, bytes).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tokensmith_core::{build, BuildOptions, TokenRecord};

    fn sample_build() -> TokenBuild {
        build(
            vec![
                TokenRecord::new(["color", "gray", "50"], "color", "#f7f7f7"),
                TokenRecord::new(["radius", "md"], "borderRadius", "8px"),
            ],
            &BuildOptions::default(),
        )
        .unwrap()
    }

    fn platforms() -> Vec<PlatformSpec> {
        vec![
            PlatformSpec::new("css", "build/css").with_file(FileSpec::new("tokens.css", "css/variables")),
            PlatformSpec::new("android", "build/android")
                .with_file(FileSpec::new("colors.xml", "android/colors"))
                .with_file(FileSpec::new("dimens.xml", "android/dimens")),
        ]
    }

    #[test]
    fn renders_files_in_configuration_order() {
        let artifacts =
            render_platforms(&sample_build(), &FormatRegistry::with_defaults(), &platforms())
                .expect("render");

        let paths: Vec<_> = artifacts.iter().map(|a| a.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("build/css/tokens.css"),
                PathBuf::from("build/android/colors.xml"),
                PathBuf::from("build/android/dimens.xml"),
            ]
        );
        assert_eq!(artifacts[0].platform, "css");
        assert!(artifacts[2].contents.contains("<dimen name=\"radius_md\">8dp</dimen>"));
    }

    #[test]
    fn unknown_format_fails() {
        let platforms =
            vec![PlatformSpec::new("ios", "build/ios").with_file(FileSpec::new("x.swift", "ios/swift"))];
        let err = render_platforms(&sample_build(), &FormatRegistry::with_defaults(), &platforms)
            .unwrap_err();
        assert_eq!(err.to_string(), "format 'ios/swift' not found");
    }

    #[test]
    fn uses_the_given_registry() {
        let mut registry = FormatRegistry::new();
        registry.register_fn("css/variables", "", |ctx| Ok(format!("{}\n", ctx.tokens.len())));
        let platforms =
            vec![PlatformSpec::new("css", "out").with_file(FileSpec::new("count.txt", "css/variables"))];

        let artifacts = render_platforms(&sample_build(), &registry, &platforms).unwrap();
        assert_eq!(artifacts[0].contents, "2\n");
    }

    #[test]
    fn checks_destination_extensions() {
        assert!(has_usual_extension(&["xml"], "colors.xml"));
        assert!(has_usual_extension(&["js", "cjs"], "nested/preset.cjs"));
        assert!(!has_usual_extension(&["kt"], "Tokens.java"));
        assert!(!has_usual_extension(&["css"], "tokens"));
        assert!(has_usual_extension(&[], "anything.txt"));
    }

    #[test]
    fn writes_artifacts_and_creates_directories() {
        let dir = tempdir().unwrap();
        let artifacts =
            render_platforms(&sample_build(), &FormatRegistry::with_defaults(), &platforms())
                .unwrap();

        let written = write_artifacts(&artifacts, dir.path()).expect("write");
        assert_eq!(written.len(), 3);
        let css = fs::read_to_string(dir.path().join("build/css/tokens.css")).unwrap();
        assert_eq!(
            css,
            ":root {\n  --color-gray-50: #f7f7f7;\n  --radius-md: 8px;\n}\n"
        );
    }
}
