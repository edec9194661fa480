//! Decision engines built on the pattern library.
//!
//! [`ResponseEngine`] picks the engine's next cell by scanning the
//! library in priority order; [`ResultEngine`] classifies a position as
//! won, lost, tied or still open. Both are stateless over a shared
//! `&'static` library, so a [`crate::game::Game`] can hold them by
//! value.

mod response;
mod result;

pub use response::ResponseEngine;
pub use result::ResultEngine;

use crate::board::Board;
use crate::patterns::PatternSet;

/// Find the first template orientation matching `board_case` under the
/// paired mask orbit, comparing only the cells the mask selects.
fn find_match(board_case: u32, targets: &PatternSet, masks: &PatternSet) -> Option<Board> {
    targets
        .boards()
        .iter()
        .zip(masks.boards())
        .find_map(|(&target, &mask)| {
            ((board_case & mask.case()) == target.sanitized().case()).then_some(target)
        })
}
