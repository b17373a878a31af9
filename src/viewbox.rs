//! `viewBox` parsing and dimension formatting.
//!
//! viewBox syntax: https://www.w3.org/TR/SVG/coords.html#ViewBoxAttribute

/// The four numbers of a `viewBox` attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Parse `min-x min-y width height`, separated by whitespace and/or a
    /// comma. Returns `None` unless there are exactly four numbers and the
    /// width and height are positive.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parser = NumberListParser::new(value);
        let mut numbers = [0.0; 4];
        for slot in &mut numbers {
            *slot = parser.next_number()?;
        }
        parser.skip_whitespace_and_comma();
        if !parser.is_eof() {
            return None;
        }

        let [min_x, min_y, width, height] = numbers;
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self {
            min_x,
            min_y,
            width,
            height,
        })
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// Format a dimension in shortest round-trip form, without a trailing `.0`.
pub fn format_dimension(n: f64) -> String {
    let mut buf = ryu::Buffer::new();
    let s = buf.format(n);
    s.strip_suffix(".0").unwrap_or(s).to_string()
}

struct NumberListParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> NumberListParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn next_number(&mut self) -> Option<f64> {
        self.skip_whitespace_and_comma();

        let start = self.pos;

        // Optional sign
        if self.peek() == Some('-') || self.peek() == Some('+') {
            self.next();
        }

        // Integer part
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.next();
        }

        // Decimal part
        if self.peek() == Some('.') {
            self.next();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.next();
            }
        }

        // Exponent
        if self.peek() == Some('e') || self.peek() == Some('E') {
            self.next();
            if self.peek() == Some('-') || self.peek() == Some('+') {
                self.next();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.next();
            }
        }

        self.input[start..self.pos]
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.next();
        }
    }

    fn skip_whitespace_and_comma(&mut self) {
        self.skip_whitespace();
        if self.peek() == Some(',') {
            self.next();
        }
        self.skip_whitespace();
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}
