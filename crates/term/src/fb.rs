//! Character grid the game view paints into.
//!
//! Colors are crossterm's own; a [`Style`] converts to a
//! [`ContentStyle`] only when the renderer prints a run.

use crossterm::style::{Attribute, Color, ContentStyle};

/// Turn a shape's canonical color into a terminal color.
pub const fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}

/// How strongly a glyph is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
    Dim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub weight: Weight,
}

impl Style {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            weight: Weight::Normal,
        }
    }

    pub const fn bold(self) -> Self {
        Self {
            weight: Weight::Bold,
            ..self
        }
    }

    pub const fn dim(self) -> Self {
        Self {
            weight: Weight::Dim,
            ..self
        }
    }

    pub fn content_style(self) -> ContentStyle {
        let mut style = ContentStyle::new();
        style.foreground_color = Some(self.fg);
        style.background_color = Some(self.bg);
        match self.weight {
            Weight::Normal => {}
            Weight::Bold => style.attributes.set(Attribute::Bold),
            Weight::Dim => style.attributes.set(Attribute::Dim),
        }
        style
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(rgb((220, 220, 220)), Color::Black)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::new(' ', Style::default())
    }
}

/// Decimal digits of a `u32`, formatted on the stack.
#[derive(Debug, Clone, Copy)]
pub struct Digits {
    buf: [u8; 10],
    start: usize,
}

impl Digits {
    pub fn new(mut n: u32) -> Self {
        let mut buf = [b'0'; 10];
        let mut start = buf.len();
        loop {
            start -= 1;
            buf[start] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        Self { buf, start }
    }

    /// Columns the number takes up.
    pub fn width(&self) -> u16 {
        (self.buf.len() - self.start) as u16
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.buf[self.start..].iter().map(|d| char::from(*d))
    }
}

/// Row-major grid of glyphs, sized to the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize and blank every glyph, reusing the allocation.
    pub fn reset(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.glyphs.clear();
        self.glyphs
            .resize(usize::from(width) * usize::from(height), Glyph::default());
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.offset(x, y).map(|i| self.glyphs[i])
    }

    /// Glyphs of row `y`; empty past the bottom edge.
    pub fn row(&self, y: u16) -> &[Glyph] {
        if y >= self.height {
            return &[];
        }
        let start = usize::from(y) * usize::from(self.width);
        &self.glyphs[start..start + usize::from(self.width)]
    }

    /// Out-of-range writes are dropped.
    pub fn put(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if let Some(i) = self.offset(x, y) {
            self.glyphs[i] = Glyph::new(ch, style);
        }
    }

    /// Write characters left to right, returning the column after the last one.
    fn put_chars(&mut self, x: u16, y: u16, chars: impl Iterator<Item = char>, style: Style) -> u16 {
        let mut col = x;
        for ch in chars {
            self.put(col, y, ch, style);
            col = col.saturating_add(1);
        }
        col
    }

    pub fn text(&mut self, x: u16, y: u16, s: &str, style: Style) -> u16 {
        self.put_chars(x, y, s.chars(), style)
    }

    pub fn number(&mut self, x: u16, y: u16, n: u32, style: Style) -> u16 {
        self.put_chars(x, y, Digits::new(n).chars(), style)
    }

    pub fn block(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: Style) {
        for row in y..y.saturating_add(h) {
            for col in x..x.saturating_add(w) {
                self.put(col, row, ch, style);
            }
        }
    }

    /// Characters of row `y` as a string.
    pub fn line(&self, y: u16) -> String {
        self.row(y).iter().map(|g| g.ch).collect()
    }
}
