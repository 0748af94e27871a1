/// SVG output for generated shapes, so the demo (or anything else) can look
/// at them without a display.
pub mod svg;
