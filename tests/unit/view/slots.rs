use super::*;
use crate::foundation::core::Bitmap;
use std::sync::Arc;

fn solid(width: u32, height: u32, px: [u8; 4]) -> Bitmap {
    let mut bytes = Vec::with_capacity((width as usize) * (height as usize) * 4);
    for _ in 0..width * height {
        bytes.extend_from_slice(&px);
    }
    Bitmap::from_premul_rgba8(width, height, bytes).unwrap()
}

#[test]
fn slots_start_empty_and_store_independently() {
    let board = SlotBoard::new();
    assert!(!board.is_occupied(SlotSide::Left));
    assert!(!board.is_occupied(SlotSide::Right));

    board.store(SlotSide::Left, solid(2, 2, [1, 0, 0, 255]));
    assert!(board.is_occupied(SlotSide::Left));
    assert!(!board.is_occupied(SlotSide::Right));
}

#[test]
fn store_replaces_wholesale() {
    let board = SlotBoard::new();
    board.store(SlotSide::Right, solid(2, 2, [1, 0, 0, 255]));
    board.store(SlotSide::Right, solid(3, 3, [0, 2, 0, 255]));

    let bmp = board.snapshot(SlotSide::Right).unwrap();
    assert_eq!(bmp.width(), 3);
    assert_eq!(bmp.pixel(1, 1).g, 2);
}

#[test]
fn concurrent_stores_leave_both_slots_intact() {
    let board = Arc::new(SlotBoard::new());

    let mut handles = Vec::new();
    for (slot, value) in [(SlotSide::Left, 11u8), (SlotSide::Right, 22u8)] {
        let board = Arc::clone(&board);
        handles.push(std::thread::spawn(move || {
            for _ in 0..200 {
                board.store(slot, solid(4, 4, [value, value, value, 255]));
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    let left = board.snapshot(SlotSide::Left).unwrap();
    let right = board.snapshot(SlotSide::Right).unwrap();
    assert!(left.pixels().iter().take(3).all(|&b| b == 11));
    assert!(right.pixels().iter().take(3).all(|&b| b == 22));
}

#[test]
fn counting_redraw_counts() {
    let redraw = CountingRedraw::new();
    assert_eq!(redraw.count(), 0);
    redraw.request_redraw();
    redraw.request_redraw();
    assert_eq!(redraw.count(), 2);
}
