mod combination;
mod result;

pub use combination::{Band, Combination, BANDS_PER_COMBINATION};
pub use result::{CombinationResult, FoldField, Status, FOLD_COUNT};
