pub mod fallthrough;
pub mod keys;
pub mod numeric;

pub use keys::{
    control_of, digit_index, index_to_digit, index_to_letter, letter_index, un_control_of, ESCAPE,
};
pub use numeric::{abs, max, min, ordered, sign, Zero};
