//! # Characters for drawing bitmaps as text

/// The characters of a horizontal border
pub struct BorderDrawing {
    /// Left corner
    pub left: char,
    /// Repeated once per column
    pub middle: char,
    /// Right corner
    pub right: char,
}

/// A full set of characters to draw a boxed bitmap
pub struct BoxDrawing {
    /// Border above the first row
    pub top: BorderDrawing,
    /// Left of every row
    pub left: char,
    /// Right of every row
    pub right: char,
    /// Border below the last row
    pub bottom: BorderDrawing,
    /// A pixel that is on
    pub ink: char,
    /// A pixel that is off
    pub no_ink: char,
}

const ASCII_BORDER: BorderDrawing = BorderDrawing {
    left: '+',
    middle: '-',
    right: '+',
};

/// Plain ASCII box
pub const ASCII: &BoxDrawing = &BoxDrawing {
    top: ASCII_BORDER,
    left: '|',
    right: '|',
    bottom: ASCII_BORDER,
    ink: '#',
    no_ink: ' ',
};

/// Box drawn with unicode double lines and full blocks
pub const UNICODE: &BoxDrawing = &BoxDrawing {
    top: BorderDrawing {
        left: '╔',
        middle: '═',
        right: '╗',
    },
    left: '║',
    right: '║',
    bottom: BorderDrawing {
        left: '╚',
        middle: '═',
        right: '╝',
    },
    ink: '█',
    no_ink: ' ',
};
