//! Legal move generation and game-ending detection.

pub mod ray_table;
pub mod targets;

use common::bitboard::{Bitboard, Square};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::board::castle_rights::{
    BLACK_KINGSIDE_RIGHTS, BLACK_QUEENSIDE_RIGHTS, WHITE_KINGSIDE_RIGHTS, WHITE_QUEENSIDE_RIGHTS,
};
use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::Board;
use crate::chess_move::castle::CastleChessMove;
use crate::chess_move::en_passant::EnPassantChessMove;
use crate::chess_move::pawn_promotion::PawnPromotionChessMove;
use crate::chess_move::standard::StandardChessMove;
use crate::chess_move::ChessMove;

use self::ray_table::Direction;

pub type ChessMoveList = SmallVec<[ChessMove; 32]>;

pub const PAWN_PROMOTIONS: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

/// Generates legal moves and answers attack queries. Holds a cache of attack
/// maps keyed by position hash, so lookups repeated within one search are
/// only computed once.
pub struct MoveGenerator {
    attacks_cache: FxHashMap<(u8, u64), Bitboard>,
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self {
            attacks_cache: FxHashMap::default(),
        }
    }
}

impl MoveGenerator {
    pub fn new() -> Self {
        Default::default()
    }

    /// All legal moves for `color`, in a deterministic order: pawn moves
    /// first (pushes, then captures, then en passant), then knight, bishop,
    /// rook, queen and king moves, then castles. Within each group, moves are
    /// ordered by origin square from a1 towards h8.
    pub fn generate_moves(&mut self, board: &mut Board, color: Color) -> ChessMoveList {
        let mut moves = ChessMoveList::new();

        self.generate_pawn_moves(&mut moves, board, color);
        for &piece in &[
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
            Piece::King,
        ] {
            self.generate_piece_moves(&mut moves, board, color, piece);
        }
        self.generate_castle_moves(&mut moves, board, color);
        self.retain_legal_moves(&mut moves, board, color);

        moves
    }

    /// The squares attacked by the piece on `square`, regardless of whose
    /// turn it is. Empty if the square is empty.
    pub fn attacks_from(&self, board: &Board, square: Square) -> Bitboard {
        let (piece, color) = match board.get(square) {
            Some(occupant) => occupant,
            None => return Bitboard::EMPTY,
        };

        match piece {
            Piece::Pawn => targets::pawn_attack_targets(square, color),
            Piece::Knight => targets::knight_targets(square),
            Piece::King => targets::king_targets(square),
            Piece::Bishop => targets::sliding_targets(square, board.occupied(), &Direction::BISHOP),
            Piece::Rook => targets::sliding_targets(square, board.occupied(), &Direction::ROOK),
            Piece::Queen => targets::sliding_targets(square, board.occupied(), &Direction::ALL),
        }
    }

    /// The union of squares attacked by every piece of `color`.
    pub fn get_attack_targets(&mut self, board: &Board, color: Color) -> Bitboard {
        let cache_key = (color as u8, board.current_position_hash());
        if let Some(&cached) = self.attacks_cache.get(&cache_key) {
            return cached;
        }

        let mut attack_targets = Bitboard::EMPTY;
        for square in board.pieces(color).occupied().squares() {
            attack_targets |= self.attacks_from(board, square);
        }

        self.attacks_cache.insert(cache_key, attack_targets);
        attack_targets
    }

    /// Counts the leaf positions reachable in exactly `depth` plies. The
    /// standard move generation validation routine.
    pub fn count_positions(&mut self, depth: u8, board: &mut Board, color: Color) -> usize {
        if depth == 0 {
            return 1;
        }

        let candidates = self.generate_moves(board, color);
        if depth == 1 {
            return candidates.len();
        }

        let mut count = 0;
        for chess_move in candidates.iter() {
            chess_move
                .apply(board)
                .expect("legal move should apply while counting positions");
            board.toggle_turn();
            count += self.count_positions(depth - 1, board, color.opposite());
            board.toggle_turn();
            chess_move
                .undo(board)
                .expect("legal move should undo while counting positions");
        }
        count
    }

    fn generate_pawn_moves(&self, moves: &mut ChessMoveList, board: &Board, color: Color) {
        let pawns = board.pieces(color).locate(Piece::Pawn);
        let enemy = board.pieces(color.opposite()).occupied();

        for pawn in pawns.squares() {
            let mut push_targets = Bitboard::EMPTY;
            let rank = pawn.rank();
            match color {
                Color::White if rank < 7 => {
                    let single = Square::from_rank_file(rank + 1, pawn.file());
                    if !board.is_occupied(single) {
                        push_targets |= single.to_bitboard();
                        if rank == 1 {
                            let double = Square::from_rank_file(3, pawn.file());
                            if !board.is_occupied(double) {
                                push_targets |= double.to_bitboard();
                            }
                        }
                    }
                }
                Color::Black if rank > 0 => {
                    let single = Square::from_rank_file(rank - 1, pawn.file());
                    if !board.is_occupied(single) {
                        push_targets |= single.to_bitboard();
                        if rank == 6 {
                            let double = Square::from_rank_file(4, pawn.file());
                            if !board.is_occupied(double) {
                                push_targets |= double.to_bitboard();
                            }
                        }
                    }
                }
                _ => {}
            }

            let capture_targets = targets::pawn_attack_targets(pawn, color) & enemy;

            for target in (push_targets | capture_targets).squares() {
                let capture = board
                    .pieces(color.opposite())
                    .get(target)
                    .map(|captured| (captured, color.opposite()));
                let promotion_rank = match color {
                    Color::White => 7,
                    Color::Black => 0,
                };
                if target.rank() == promotion_rank {
                    for &promote_to in &PAWN_PROMOTIONS {
                        moves.push(ChessMove::PawnPromotion(PawnPromotionChessMove::new(
                            pawn, target, capture, promote_to,
                        )));
                    }
                } else {
                    moves.push(ChessMove::Standard(StandardChessMove::new(
                        pawn, target, capture,
                    )));
                }
            }
        }

        self.generate_en_passant_moves(moves, board, color);
    }

    fn generate_en_passant_moves(&self, moves: &mut ChessMoveList, board: &Board, color: Color) {
        let target = match board.peek_en_passant_target() {
            Some(target) => target,
            None => return,
        };

        for pawn in board.pieces(color).locate(Piece::Pawn).squares() {
            if target.overlaps(targets::pawn_attack_targets(pawn, color)) {
                moves.push(ChessMove::EnPassant(EnPassantChessMove::new(pawn, target)));
            }
        }
    }

    fn generate_piece_moves(
        &self,
        moves: &mut ChessMoveList,
        board: &Board,
        color: Color,
        piece: Piece,
    ) {
        let own = board.pieces(color).occupied();
        for from_square in board.pieces(color).locate(piece).squares() {
            let piece_targets = match piece {
                Piece::Knight => targets::knight_targets(from_square),
                Piece::King => targets::king_targets(from_square),
                Piece::Bishop => {
                    targets::sliding_targets(from_square, board.occupied(), &Direction::BISHOP)
                }
                Piece::Rook => {
                    targets::sliding_targets(from_square, board.occupied(), &Direction::ROOK)
                }
                Piece::Queen => {
                    targets::sliding_targets(from_square, board.occupied(), &Direction::ALL)
                }
                Piece::Pawn => unreachable!("pawn moves are generated separately"),
            };

            for to_square in (piece_targets & !own).squares() {
                let capture = board
                    .pieces(color.opposite())
                    .get(to_square)
                    .map(|captured| (captured, color.opposite()));
                moves.push(ChessMove::Standard(StandardChessMove::new(
                    from_square,
                    to_square,
                    capture,
                )));
            }
        }
    }

    fn generate_castle_moves(&mut self, moves: &mut ChessMoveList, board: &Board, color: Color) {
        let attacked = self.get_attack_targets(board, color.opposite());
        if board.pieces(color).locate(Piece::King).overlaps(attacked) {
            return;
        }

        let rank = match color {
            Color::White => 0,
            Color::Black => 7,
        };

        // Castling rights may be stale in hand-built positions; the king
        // must actually be standing on its home square.
        let king_home = Square::from_rank_file(rank, 4);
        if !king_home.overlaps(board.pieces(color).locate(Piece::King)) {
            return;
        }

        let rights = board.peek_castle_rights();
        let (kingside_rights, queenside_rights) = match color {
            Color::White => (
                rights & WHITE_KINGSIDE_RIGHTS,
                rights & WHITE_QUEENSIDE_RIGHTS,
            ),
            Color::Black => (
                rights & BLACK_KINGSIDE_RIGHTS,
                rights & BLACK_QUEENSIDE_RIGHTS,
            ),
        };

        let rooks = board.pieces(color).locate(Piece::Rook);
        let occupied = board.occupied();

        // Kingside: f and g must be empty, f must not be attacked (the king
        // crosses it), and the rook must still be on h. The king's landing
        // square is vetted by the legality filter like any other move.
        let f_square = Square::from_rank_file(rank, 5);
        let g_square = Square::from_rank_file(rank, 6);
        let h_square = Square::from_rank_file(rank, 7);
        if kingside_rights > 0
            && !occupied.overlaps(f_square.to_bitboard() | g_square.to_bitboard())
            && !f_square.overlaps(attacked)
            && h_square.overlaps(rooks)
        {
            moves.push(ChessMove::Castle(CastleChessMove::castle_kingside(color)));
        }

        // Queenside: b, c and d must be empty, d must not be attacked, and
        // the rook must still be on a.
        let a_square = Square::from_rank_file(rank, 0);
        let b_square = Square::from_rank_file(rank, 1);
        let c_square = Square::from_rank_file(rank, 2);
        let d_square = Square::from_rank_file(rank, 3);
        if queenside_rights > 0
            && !occupied
                .overlaps(b_square.to_bitboard() | c_square.to_bitboard() | d_square.to_bitboard())
            && !d_square.overlaps(attacked)
            && a_square.overlaps(rooks)
        {
            moves.push(ChessMove::Castle(CastleChessMove::castle_queenside(color)));
        }
    }

    /// Simulates each candidate and drops the ones that leave the mover's own
    /// king attacked.
    fn retain_legal_moves(
        &mut self,
        candidates: &mut ChessMoveList,
        board: &mut Board,
        color: Color,
    ) {
        let mut legal_moves = ChessMoveList::new();

        for chess_move in candidates.drain(..) {
            chess_move
                .apply(board)
                .expect("pseudo-legal move should apply during legality filtering");
            let king = board.pieces(color).locate(Piece::King);
            let attacked = self.get_attack_targets(board, color.opposite());
            chess_move
                .undo(board)
                .expect("pseudo-legal move should undo during legality filtering");

            if !king.overlaps(attacked) {
                legal_moves.push(chess_move);
            }
        }

        *candidates = legal_moves;
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEnding {
    Checkmate,
    Stalemate,
    Draw,
}

pub fn player_is_in_check(
    board: &Board,
    move_generator: &mut MoveGenerator,
    player: Color,
) -> bool {
    let king = board.pieces(player).locate(Piece::King);
    let attacked = move_generator.get_attack_targets(board, player.opposite());
    king.overlaps(attacked)
}

pub fn current_player_is_in_check(board: &Board, move_generator: &mut MoveGenerator) -> bool {
    player_is_in_check(board, move_generator, board.turn())
}

pub fn player_is_in_checkmate(
    board: &mut Board,
    move_generator: &mut MoveGenerator,
    player: Color,
) -> bool {
    let check = player_is_in_check(board, move_generator, player);
    check && move_generator.generate_moves(board, player).is_empty()
}

/// The terminal-state predicate: reports how the game has ended, if it has.
/// Draws cover threefold repetition and the fifty-move rule; positions with
/// no legal continuation are checkmate or stalemate.
pub fn game_ending(
    board: &mut Board,
    move_generator: &mut MoveGenerator,
    current_turn: Color,
) -> Option<GameEnding> {
    if board.max_seen_position_count() >= 3 {
        return Some(GameEnding::Draw);
    }

    if board.halfmove_clock() >= 100 {
        return Some(GameEnding::Draw);
    }

    let candidates = move_generator.generate_moves(board, current_turn);
    if candidates.is_empty() {
        if current_player_is_in_check(board, move_generator) {
            return Some(GameEnding::Checkmate);
        } else {
            return Some(GameEnding::Stalemate);
        }
    }

    None
}
