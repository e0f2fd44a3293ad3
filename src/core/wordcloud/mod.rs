//! Word cloud generation
//!
//! - `frequency`: tokenizing, stop-word removal and counting
//! - `layout`: spiral placement of sized words on the canvas
//! - `render`: PNG rasterization and SVG output
//! - `stopwords`: the English stop-word list

pub mod frequency;
pub mod layout;
pub mod render;
pub mod stopwords;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::normalize;
use crate::error::{RenderError, Result};
use frequency::word_frequencies;
use layout::{layout, PlacedWord, TextMeasure};
use render::{ApproxMeasure, FontMeasure};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudOptions {
    pub width: u32,
    pub height: u32,
    /// Colour name or `#rrggbb`
    pub background: String,
    pub max_words: usize,
    pub min_font_size: u32,
    /// Defaults to a third of the canvas height
    pub max_font_size: Option<u32>,
    pub font_step: u32,
    /// How strongly frequency drives font size, from 0 (rank only) to 1
    pub relative_scaling: f32,
    /// Minimum gap between words, in pixels
    pub margin: u32,
    /// TrueType font for PNG output; a system font is used when unset
    pub font_path: Option<PathBuf>,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            background: "white".to_string(),
            max_words: 200,
            min_font_size: 4,
            max_font_size: None,
            font_step: 2,
            relative_scaling: 0.5,
            margin: 2,
            font_path: None,
        }
    }
}

impl CloudOptions {
    pub fn effective_max_font_size(&self) -> u32 {
        self.max_font_size
            .unwrap_or(self.height / 3)
            .max(self.min_font_size)
    }
}

/// A laid-out cloud, independent of the output format.
#[derive(Debug, Clone, Serialize)]
pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    pub words: Vec<PlacedWord>,
}

impl WordCloud {
    /// Count, size and place the words of `text`. Blank text is rejected
    /// before any work is done.
    pub fn generate(text: &str, options: &CloudOptions, measure: &dyn TextMeasure) -> Result<Self> {
        if normalize::is_blank(text) {
            return Err(RenderError::EmptyText.into());
        }

        let frequencies = word_frequencies(text, options.max_words);
        if frequencies.is_empty() {
            return Err(RenderError::NoWords.into());
        }
        debug!("Counted {} distinct word(s)", frequencies.len());

        let words = layout(&frequencies, options, measure);
        Ok(Self {
            width: options.width,
            height: options.height,
            words,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// `.svg` selects SVG; anything else is written as PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputFormat::Svg,
            _ => OutputFormat::Png,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedCloud {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub words_placed: usize,
}

/// Renders cleaned lyrics to an image file.
pub struct CloudRenderer {
    options: CloudOptions,
}

impl CloudRenderer {
    pub fn new(options: CloudOptions) -> Self {
        Self { options }
    }

    pub fn render_to_file(&self, text: &str, path: &Path) -> Result<RenderedCloud> {
        if normalize::is_blank(text) {
            return Err(RenderError::EmptyText.into());
        }

        let background = render::parse_color(&self.options.background)?;
        let format = OutputFormat::from_path(path);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(RenderError::Io)?;
        }

        let cloud = match format {
            OutputFormat::Svg => {
                let cloud = WordCloud::generate(text, &self.options, &ApproxMeasure)?;
                fs::write(path, render::to_svg(&cloud, background)).map_err(RenderError::Io)?;
                cloud
            }
            OutputFormat::Png => {
                let font = FontMeasure::discover(self.options.font_path.as_deref())?;
                let cloud = WordCloud::generate(text, &self.options, &font)?;
                render::to_image(&cloud, &font, background)
                    .save_with_format(path, image::ImageFormat::Png)
                    .map_err(RenderError::Image)?;
                cloud
            }
        };

        info!("Word cloud with {} word(s) written to {}", cloud.words.len(), path.display());

        Ok(RenderedCloud {
            path: path.to_path_buf(),
            format,
            words_placed: cloud.words.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LyricloudError;
    use tempfile::tempdir;

    #[test]
    fn test_blank_text_is_rejected_before_generation() {
        for text in ["", "   ", "\n\t\n"] {
            let err = WordCloud::generate(text, &CloudOptions::default(), &ApproxMeasure).unwrap_err();
            assert!(matches!(err, LyricloudError::Render(RenderError::EmptyText)));
        }
    }

    #[test]
    fn test_blank_text_writes_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cloud.png");
        let renderer = CloudRenderer::new(CloudOptions::default());

        let err = renderer.render_to_file("  \n ", &path).unwrap_err();
        assert!(matches!(err, LyricloudError::Render(RenderError::EmptyText)));
        assert!(!path.exists());
    }

    #[test]
    fn test_stopword_only_text_has_no_words() {
        let err = WordCloud::generate("the and of", &CloudOptions::default(), &ApproxMeasure).unwrap_err();
        assert!(matches!(err, LyricloudError::Render(RenderError::NoWords)));
    }

    #[test]
    fn test_generate_places_most_frequent_word_first() {
        let text = "love love love story story romeo";
        let cloud = WordCloud::generate(text, &CloudOptions::default(), &ApproxMeasure).unwrap();
        assert_eq!(cloud.width, 800);
        assert_eq!(cloud.height, 400);
        assert_eq!(cloud.words.len(), 3);
        assert_eq!(cloud.words[0].text, "love");
    }

    #[test]
    fn test_svg_file_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("cloud.svg");
        let renderer = CloudRenderer::new(CloudOptions::default());

        let rendered = renderer
            .render_to_file("We were both young when I first saw you", &path)
            .unwrap();
        assert_eq!(rendered.format, OutputFormat::Svg);
        assert!(rendered.words_placed > 0);

        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("young"));
    }

    #[test]
    fn test_png_file_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cloud.png");
        let renderer = CloudRenderer::new(CloudOptions::default());

        let rendered = renderer
            .render_to_file("Romeo take me somewhere we can be alone", &path)
            .unwrap();
        assert_eq!(rendered.format, OutputFormat::Png);
        assert!(rendered.words_placed > 0);

        let image = image::open(&path).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (800, 400));
        assert!(image.pixels().any(|p| p.0 != [255, 255, 255, 255]));
    }

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.SVG")), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("cloud.png")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("cloud")), OutputFormat::Png);
    }

    #[test]
    fn test_effective_max_font_size() {
        let options = CloudOptions::default();
        assert_eq!(options.effective_max_font_size(), 133);

        let options = CloudOptions {
            max_font_size: Some(2),
            min_font_size: 4,
            ..CloudOptions::default()
        };
        assert_eq!(options.effective_max_font_size(), 4);
    }
}
