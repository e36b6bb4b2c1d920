//! Pieces tests - matrices, clockwise rotation and spawn placement

use arcade::core::pieces::{spawn_x, Piece, PieceView, Shape};
use arcade::types::PieceKind;

fn picture(shape: &Shape) -> Vec<String> {
    shape
        .to_rows()
        .iter()
        .map(|row| row.iter().map(|&c| if c { '#' } else { '.' }).collect())
        .collect()
}

// ============== Shape Tests ==============

#[test]
fn test_spawn_shapes() {
    assert_eq!(picture(&Shape::of(PieceKind::I)), ["####"]);
    assert_eq!(picture(&Shape::of(PieceKind::O)), ["##", "##"]);
    assert_eq!(picture(&Shape::of(PieceKind::T)), ["###", ".#."]);
    assert_eq!(picture(&Shape::of(PieceKind::L)), ["###", "#.."]);
    assert_eq!(picture(&Shape::of(PieceKind::J)), ["###", "..#"]);
    assert_eq!(picture(&Shape::of(PieceKind::S)), ["##.", ".##"]);
    assert_eq!(picture(&Shape::of(PieceKind::Z)), [".##", "##."]);
}

#[test]
fn test_every_shape_has_four_minos() {
    for kind in PieceKind::ALL {
        let shape = Shape::of(kind);
        let filled = shape.to_rows().iter().flatten().filter(|&&c| c).count();
        assert_eq!(filled, 4, "{:?}", kind);
        for (x, y) in shape.minos() {
            assert!(shape.filled(x as usize, y as usize));
        }
    }
}

#[test]
fn test_minos_are_row_major() {
    assert_eq!(Shape::of(PieceKind::T).minos(), [(0, 0), (1, 0), (2, 0), (1, 1)]);
    assert_eq!(Shape::of(PieceKind::S).minos(), [(0, 0), (1, 0), (1, 1), (2, 1)]);
}

// ============== Rotation Tests ==============

#[test]
fn test_rotate_t_clockwise() {
    let shape = Shape::of(PieceKind::T).rotated_cw();
    assert_eq!(picture(&shape), [".#", "##", ".#"]);
    assert_eq!(shape.width(), 2);
    assert_eq!(shape.height(), 3);
}

#[test]
fn test_rotate_i_is_vertical() {
    let shape = Shape::of(PieceKind::I).rotated_cw();
    assert_eq!(picture(&shape), ["#", "#", "#", "#"]);
}

#[test]
fn test_rotate_s_and_z() {
    assert_eq!(
        picture(&Shape::of(PieceKind::S).rotated_cw()),
        [".#", "##", "#."]
    );
    assert_eq!(
        picture(&Shape::of(PieceKind::Z).rotated_cw()),
        ["#.", "##", ".#"]
    );
}

#[test]
fn test_rotate_l_twice_is_upside_down() {
    let shape = Shape::of(PieceKind::L).rotated_cw().rotated_cw();
    assert_eq!(picture(&shape), ["..#", "###"]);
}

#[test]
fn test_o_rotation_is_identity() {
    let o = Shape::of(PieceKind::O);
    assert_eq!(o.rotated_cw(), o);
}

#[test]
fn test_four_rotations_return_to_start() {
    for kind in PieceKind::ALL {
        let start = Shape::of(kind);
        let mut shape = start;
        for _ in 0..4 {
            shape = shape.rotated_cw();
        }
        assert_eq!(shape, start, "{:?}", kind);
    }
}

// ============== Spawn Tests ==============

#[test]
fn test_spawn_columns() {
    assert_eq!(spawn_x(4), 3);
    assert_eq!(spawn_x(3), 4);
    assert_eq!(spawn_x(2), 4);
    assert_eq!(spawn_x(1), 5);

    assert_eq!(Piece::spawn(PieceKind::I).x, 3);
    assert_eq!(Piece::spawn(PieceKind::O).x, 4);
    assert_eq!(Piece::spawn(PieceKind::T).x, 4);
    for kind in PieceKind::ALL {
        assert_eq!(Piece::spawn(kind).y, 0);
    }
}

#[test]
fn test_piece_cells_follow_anchor() {
    let piece = Piece::spawn(PieceKind::T).shifted(-2, 5);
    assert_eq!(piece.cells(), [(2, 5), (3, 5), (4, 5), (3, 6)]);
}

#[test]
fn test_recenter_keeps_orientation() {
    let piece = Piece::spawn(PieceKind::I).rotated().shifted(4, 7).recentered();
    assert_eq!(piece.shape, Shape::of(PieceKind::I).rotated_cw());
    assert_eq!(piece.x, 5);
    assert_eq!(piece.y, 0);
}

#[test]
fn test_piece_view_carries_color() {
    let view = PieceView::from(Piece::spawn(PieceKind::Z));
    assert_eq!(view.kind, "z");
    assert_eq!(view.color, "#ff0000");
    assert_eq!(view.shape, vec![vec![false, true, true], vec![true, true, false]]);
}
