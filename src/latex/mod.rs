mod conv;
mod matrix;
mod number;
mod operators;
mod string;
mod symbols;
mod utils;

pub use conv::converter::LatexConverter;
pub use conv::value::{Rendered, Value, render_args, render_value};
pub use number::{FancyNumberFormatter, NumberFormat, NumberFormatter, PrintfNumberFormatter, format_plain};
pub use string::LatexString;
pub use symbols::{substitute_unicode, unicode_to_latex};
pub use utils::{convert_subscript, escape_latex_special_chars};
