use crate::board::piece::Piece;

/// Material weight of a piece. The king is worth nothing: it is never
/// captured in a legally terminated game, so its value cannot enter the
/// balance.
pub fn material_value(piece: Piece) -> i16 {
    match piece {
        Piece::Pawn => 1,
        Piece::Knight => 3,
        Piece::Bishop => 3,
        Piece::Rook => 5,
        Piece::Queen => 9,
        Piece::King => 0,
    }
}
