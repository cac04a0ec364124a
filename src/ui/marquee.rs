// Endless scrolling text line.
//
// The text is tiled enough times to cover three container widths (plus
// two spare copies, never fewer than four copies), then doubled. The
// scroll offset wraps at half the tiled length, so the seam is never
// visible.

pub const MIN_COPIES: usize = 4;

pub fn copies_needed(container_width: usize, text_width: usize) -> usize {
    if text_width == 0 {
        return MIN_COPIES;
    }
    let needed = (container_width * 3).div_ceil(text_width) + 2;
    needed.max(MIN_COPIES)
}

#[derive(Debug, Clone)]
pub struct Marquee {
    text: String,
    /// Columns per second.
    speed: f64,
    width: usize,
    content: Vec<char>,
    offset: f64,
}

impl Marquee {
    pub fn new(text: impl Into<String>, speed: f64) -> Self {
        Marquee {
            text: text.into(),
            speed: speed.max(0.0),
            width: 0,
            content: Vec::new(),
            offset: 0.0,
        }
    }

    /// Re-tile for a container width. Cheap when the width is unchanged.
    pub fn layout(&mut self, width: usize) {
        if width == self.width && !self.content.is_empty() {
            return;
        }
        self.width = width;
        let copies = copies_needed(width, self.text.chars().count());
        self.content = self.text.repeat(copies * 2).chars().collect();
        self.offset %= self.period().max(1) as f64;
    }

    // Length after which the tiled content repeats itself.
    fn period(&self) -> usize {
        self.content.len() / 2
    }

    pub fn advance(&mut self, seconds: f64) {
        let period = self.period();
        if period == 0 {
            return;
        }
        self.offset = (self.offset + self.speed * seconds) % period as f64;
    }

    pub fn visible(&self) -> String {
        if self.content.is_empty() {
            return String::new();
        }
        let start = self.offset as usize;
        self.content
            .iter()
            .cycle()
            .skip(start)
            .take(self.width)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_cover_three_widths_with_a_floor() {
        assert_eq!(copies_needed(100, 10), 32);
        assert_eq!(copies_needed(10, 100), MIN_COPIES);
        assert_eq!(copies_needed(0, 5), MIN_COPIES);
        assert_eq!(copies_needed(80, 0), MIN_COPIES);
    }

    #[test]
    fn visible_window_scrolls_and_wraps() {
        let mut marquee = Marquee::new("ab ", 1.0);
        marquee.layout(4);
        assert_eq!(marquee.visible(), "ab a");
        marquee.advance(1.0);
        assert_eq!(marquee.visible(), "b ab");
        // One full period brings the window back to where it was.
        let period = marquee.content.len() / 2;
        marquee.advance(period as f64);
        assert_eq!(marquee.visible(), "b ab");
    }

    #[test]
    fn empty_text_renders_nothing() {
        let mut marquee = Marquee::new("", 5.0);
        marquee.layout(20);
        marquee.advance(3.0);
        assert_eq!(marquee.visible(), "");
    }
}
