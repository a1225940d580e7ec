//! Board snapshots.
//!
//! A `Board` is a sparse map from square to piece plus the id allocator. It is
//! never edited by players directly: sessions derive it by replaying history
//! onto a base arrangement (see [`crate::rules::Rules::compute_state`]).
//!
//! Backed by `im::OrdMap`, so cloning is O(1). Legality probing clones the
//! board, applies a hypothetical move and inspects the result without touching
//! the real snapshot.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::entity::{IdAllocator, PieceId};
use super::error::ReplayError;
use super::geometry::Square;
use super::side::{Side, SideMap};

/// Common interface of every game's piece type.
pub trait Piece: Clone + PartialEq + std::fmt::Debug {
    fn id(&self) -> PieceId;
    fn side(&self) -> Side;
}

/// A board snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "P: Serialize",
    deserialize = "P: Deserialize<'de> + Clone"
))]
pub struct Board<P: Clone> {
    cells: OrdMap<Square, P>,
    ids: IdAllocator,
}

impl<P: Clone> Default for Board<P> {
    fn default() -> Self {
        Self {
            cells: OrdMap::new(),
            ids: IdAllocator::default(),
        }
    }
}

impl<P: Piece> Board<P> {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Piece on `square`, if any.
    #[must_use]
    pub fn get(&self, square: Square) -> Option<&P> {
        self.cells.get(&square)
    }

    #[must_use]
    pub fn is_empty_at(&self, square: Square) -> bool {
        !self.cells.contains_key(&square)
    }

    /// Side of the piece on `square`, if any.
    #[must_use]
    pub fn side_at(&self, square: Square) -> Option<Side> {
        self.get(square).map(Piece::side)
    }

    /// Put a piece on an empty square.
    pub fn place(&mut self, square: Square, piece: P) -> Result<(), ReplayError> {
        if self.cells.contains_key(&square) {
            return Err(ReplayError::Occupied(square));
        }
        self.ids.observe(piece.id());
        self.cells.insert(square, piece);
        Ok(())
    }

    /// Replace whatever is on `square` with `piece`.
    ///
    /// Used for in-place changes of a piece that keeps its square: kinging,
    /// promotion, recoloring.
    pub fn replace(&mut self, square: Square, piece: P) -> Option<P> {
        self.ids.observe(piece.id());
        self.cells.insert(square, piece)
    }

    /// Take the piece off `square`.
    pub fn remove(&mut self, square: Square) -> Option<P> {
        self.cells.remove(&square)
    }

    /// Take the piece off `square`, checking it is the one expected.
    pub fn take(&mut self, square: Square, expected: PieceId) -> Result<P, ReplayError> {
        let found = self
            .get(square)
            .ok_or(ReplayError::MissingPiece(square))?
            .id();
        if found != expected {
            return Err(ReplayError::PieceMismatch {
                square,
                expected,
                found,
            });
        }
        self.remove(square).ok_or(ReplayError::MissingPiece(square))
    }

    /// Mint an id for a piece that enters play mid-game.
    pub fn mint_id(&mut self) -> PieceId {
        self.ids.mint()
    }

    /// The id the next mint would return, without consuming it.
    #[must_use]
    pub fn next_id(&self) -> PieceId {
        self.ids.peek()
    }

    /// All pieces in square index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &P)> {
        self.cells.iter().map(|(square, piece)| (*square, piece))
    }

    /// Pieces belonging to `side`, in square index order.
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Square, &P)> {
        self.pieces().filter(move |(_, piece)| piece.side() == side)
    }

    /// Where the piece with identity `id` currently stands.
    #[must_use]
    pub fn find(&self, id: PieceId) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.id() == id)
            .map(|(square, _)| square)
    }

    /// Number of pieces of each side.
    #[must_use]
    pub fn count(&self) -> SideMap<u32> {
        let mut counts = SideMap::with_value(0);
        for (_, piece) in self.pieces() {
            counts[piece.side()] += 1;
        }
        counts
    }

    /// Total number of pieces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Stone {
        id: PieceId,
        side: Side,
    }

    impl Piece for Stone {
        fn id(&self) -> PieceId {
            self.id
        }

        fn side(&self) -> Side {
            self.side
        }
    }

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn stone(board: &mut Board<Stone>, side: Side) -> Stone {
        Stone {
            id: board.mint_id(),
            side,
        }
    }

    #[test]
    fn test_place_and_get() {
        let mut board = Board::new();
        let light = stone(&mut board, Side::Light);

        board.place(sq("c3"), light.clone()).unwrap();

        assert_eq!(board.get(sq("c3")), Some(&light));
        assert!(board.is_empty_at(sq("c4")));
        assert_eq!(board.side_at(sq("c3")), Some(Side::Light));
        assert_eq!(board.find(light.id), Some(sq("c3")));
    }

    #[test]
    fn test_place_on_occupied_fails() {
        let mut board = Board::new();
        let a = stone(&mut board, Side::Light);
        let b = stone(&mut board, Side::Dark);

        board.place(sq("d4"), a).unwrap();
        assert_eq!(board.place(sq("d4"), b), Err(ReplayError::Occupied(sq("d4"))));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_take_checks_identity() {
        let mut board = Board::new();
        let a = stone(&mut board, Side::Light);
        board.place(sq("e5"), a.clone()).unwrap();

        let err = board.take(sq("e5"), PieceId(99)).unwrap_err();
        assert_eq!(
            err,
            ReplayError::PieceMismatch {
                square: sq("e5"),
                expected: PieceId(99),
                found: a.id,
            }
        );
        assert_eq!(board.take(sq("e5"), a.id), Ok(a));
        assert_eq!(board.take(sq("e5"), PieceId(0)), Err(ReplayError::MissingPiece(sq("e5"))));
    }

    #[test]
    fn test_ids_never_reused() {
        let mut board = Board::new();
        let a = stone(&mut board, Side::Light);
        board.place(sq("a1"), a.clone()).unwrap();
        board.remove(sq("a1"));

        assert_ne!(board.mint_id(), a.id);
    }

    #[test]
    fn test_place_observes_foreign_ids() {
        let mut board: Board<Stone> = Board::new();
        board
            .place(sq("h8"), Stone { id: PieceId(40), side: Side::Dark })
            .unwrap();
        assert_eq!(board.next_id(), PieceId(41));
    }

    #[test]
    fn test_counts_and_order() {
        let mut board = Board::new();
        for name in ["h8", "a1", "d4"] {
            let s = stone(&mut board, Side::Dark);
            board.place(sq(name), s).unwrap();
        }
        let l = stone(&mut board, Side::Light);
        board.place(sq("b2"), l).unwrap();

        let order: Vec<_> = board.pieces().map(|(s, _)| s).collect();
        assert_eq!(order, vec![sq("a1"), sq("b2"), sq("d4"), sq("h8")]);
        assert_eq!(board.count()[Side::Dark], 3);
        assert_eq!(board.count()[Side::Light], 1);
        assert_eq!(board.pieces_of(Side::Light).count(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut board = Board::new();
        let a = stone(&mut board, Side::Light);
        board.place(sq("a1"), a).unwrap();

        let mut probe = board.clone();
        probe.remove(sq("a1"));

        assert!(probe.is_empty());
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_serialization() {
        let mut board = Board::new();
        let a = stone(&mut board, Side::Light);
        board.place(sq("f6"), a).unwrap();

        let json = serde_json::to_string(&board).unwrap();
        assert!(json.contains("\"f6\""));
        let back: Board<Stone> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);

        let bytes = bincode::serialize(&board).unwrap();
        let back: Board<Stone> = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, board);
    }
}
