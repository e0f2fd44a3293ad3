//! Spiral word placement
//!
//! Words are placed most frequent first. Each one walks an Archimedean spiral
//! out from the canvas centre and takes the first spot where its box fits
//! inside the canvas without touching an already placed word. A word that
//! does not fit is retried smaller; once a word fails at the minimum font
//! size the layout ends.

use serde::Serialize;

use super::frequency::WordFrequency;
use super::CloudOptions;

/// Spiral growth in pixels per radian.
const SPIRAL_STEP: f32 = 2.0;
const ANGLE_STEP: f32 = 0.1;

/// Measures rendered text. Returns `(width, height)` in pixels.
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: f32) -> (u32, u32);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWord {
    pub text: String,
    pub font_size: f32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index into the colour palette
    pub color: usize,
}

impl PlacedWord {
    fn overlaps(&self, x: u32, y: u32, width: u32, height: u32, margin: u32) -> bool {
        let (ax0, ay0) = (x.saturating_sub(margin), y.saturating_sub(margin));
        let ax1 = x.saturating_add(width).saturating_add(margin);
        let ay1 = y.saturating_add(height).saturating_add(margin);
        let (bx0, by0) = (self.x, self.y);
        let (bx1, by1) = (self.x + self.width, self.y + self.height);
        ax0 < bx1 && bx0 < ax1 && ay0 < by1 && by0 < ay1
    }
}

pub fn layout(
    words: &[WordFrequency],
    options: &CloudOptions,
    measure: &dyn TextMeasure,
) -> Vec<PlacedWord> {
    let mut placed: Vec<PlacedWord> = Vec::with_capacity(words.len());
    let min_size = options.min_font_size.max(1) as f32;
    let step = options.font_step.max(1) as f32;
    let rs = options.relative_scaling;

    let mut font_size = options.effective_max_font_size() as f32;
    let mut last_weight = 1.0f32;

    for (index, word) in words.iter().enumerate() {
        if word.weight <= 0.0 {
            continue;
        }

        if rs > 0.0 {
            font_size = ((rs * (word.weight / last_weight) + (1.0 - rs)) * font_size).round();
        }

        let mut spot = None;
        while font_size >= min_size {
            let (w, h) = measure.measure(&word.text, font_size);
            if let Some((x, y)) = find_position(&placed, w, h, options) {
                spot = Some((x, y, w, h));
                break;
            }
            font_size -= step;
        }

        let (x, y, width, height) = match spot {
            Some(spot) => spot,
            None => {
                tracing::debug!("Canvas full after {} word(s)", placed.len());
                break;
            }
        };

        placed.push(PlacedWord {
            text: word.text.clone(),
            font_size,
            x,
            y,
            width,
            height,
            color: index,
        });
        last_weight = word.weight;
    }

    placed
}

fn find_position(placed: &[PlacedWord], w: u32, h: u32, options: &CloudOptions) -> Option<(u32, u32)> {
    let (cw, ch) = (options.width, options.height);
    if w == 0 || h == 0 || w > cw || h > ch {
        return None;
    }

    // Spiral over top-left corners so the box is centred on the spiral point
    let cx = (cw - w) as f32 / 2.0;
    let cy = (ch - h) as f32 / 2.0;
    let aspect = cw as f32 / ch as f32;
    let max_radius = cw.max(ch) as f32;

    let mut theta = 0.0f32;
    loop {
        let r = SPIRAL_STEP * theta;
        if r > max_radius {
            return None;
        }

        let x = (cx + aspect * r * theta.cos()).round();
        let y = (cy + r * theta.sin()).round();
        theta += ANGLE_STEP;

        if x < 0.0 || y < 0.0 {
            continue;
        }
        let (x, y) = (x as u32, y as u32);
        if x + w > cw || y + h > ch {
            continue;
        }
        if placed.iter().all(|p| !p.overlaps(x, y, w, h, options.margin)) {
            return Some((x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Monospace stand-in: every glyph is `0.6 * size` wide.
    struct Mono;

    impl TextMeasure for Mono {
        fn measure(&self, text: &str, font_size: f32) -> (u32, u32) {
            let w = (text.chars().count() as f32 * font_size * 0.6).ceil() as u32;
            let h = (font_size * 1.2).ceil() as u32;
            (w, h)
        }
    }

    fn options(width: u32, height: u32) -> CloudOptions {
        CloudOptions {
            width,
            height,
            ..CloudOptions::default()
        }
    }

    fn freq(text: &str, weight: f32) -> WordFrequency {
        WordFrequency {
            text: text.to_string(),
            count: (weight * 10.0) as usize,
            weight,
        }
    }

    #[test]
    fn test_first_word_is_centred() {
        let opts = options(400, 200);
        let placed = layout(&[freq("love", 1.0)], &opts, &Mono);
        assert_eq!(placed.len(), 1);

        let word = &placed[0];
        let centre_x = word.x + word.width / 2;
        let centre_y = word.y + word.height / 2;
        assert!((centre_x as i64 - 200).abs() <= 1);
        assert!((centre_y as i64 - 100).abs() <= 1);
    }

    #[test]
    fn test_words_stay_inside_and_never_overlap() {
        let opts = options(300, 150);
        let words: Vec<WordFrequency> = [
            ("love", 1.0), ("story", 0.8), ("romeo", 0.7), ("juliet", 0.6), ("balcony", 0.5),
            ("prince", 0.4), ("princess", 0.4), ("stairs", 0.3), ("scarlet", 0.3), ("letter", 0.2),
            ("garden", 0.2), ("father", 0.1), ("town", 0.1), ("ring", 0.1), ("dress", 0.1),
        ]
        .iter()
        .map(|(t, w)| freq(t, *w))
        .collect();

        let placed = layout(&words, &opts, &Mono);
        assert!(placed.len() > 3);

        for (i, a) in placed.iter().enumerate() {
            assert!(a.x + a.width <= opts.width, "{} exceeds width", a.text);
            assert!(a.y + a.height <= opts.height, "{} exceeds height", a.text);
            for b in placed.iter().skip(i + 1) {
                assert!(!a.overlaps(b.x, b.y, b.width, b.height, 0), "{} overlaps {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn test_sizes_follow_frequency() {
        let opts = options(800, 400);
        let placed = layout(&[freq("love", 1.0), freq("story", 0.5), freq("romeo", 0.1)], &opts, &Mono);
        assert_eq!(placed.len(), 3);
        assert!(placed[0].font_size > placed[1].font_size);
        assert!(placed[1].font_size > placed[2].font_size);
    }

    #[test]
    fn test_word_too_big_for_canvas_is_shrunk() {
        let opts = CloudOptions {
            width: 100,
            height: 60,
            max_font_size: Some(200),
            ..CloudOptions::default()
        };
        let placed = layout(&[freq("extraordinary", 1.0)], &opts, &Mono);
        assert_eq!(placed.len(), 1);
        assert!(placed[0].width <= 100);
        assert!(placed[0].font_size >= opts.min_font_size as f32);
    }

    #[test]
    fn test_layout_stops_when_canvas_is_full() {
        let opts = CloudOptions {
            width: 60,
            height: 60,
            min_font_size: 20,
            max_font_size: Some(20),
            relative_scaling: 0.0,
            ..CloudOptions::default()
        };
        let words: Vec<WordFrequency> = (0..50).map(|i| freq(&format!("w{}", i), 1.0)).collect();
        let placed = layout(&words, &opts, &Mono);
        assert!(!placed.is_empty());
        assert!(placed.len() < 50);
    }
}
