#![allow(missing_docs)]

use flappy_evo::simulation::mask::Mask;
use flappy_evo::simulation::sprites::{self, SpriteSheet};

fn solid(width: usize, height: usize) -> Mask {
    let mut mask = Mask::new(width, height);
    for y in 0..height {
        for x in 0..width {
            mask.set(x, y, true);
        }
    }
    mask
}

#[test]
fn test_alpha_threshold() {
    // two pixels: alpha 127 stays clear, 128 is solid
    let rgba = [255, 0, 0, 127, 255, 0, 0, 128];
    let mask = Mask::from_rgba(2, 1, &rgba);

    assert!(!mask.get(0, 0));
    assert!(mask.get(1, 0));
    assert_eq!(mask.count(), 1);
}

#[test]
fn test_out_of_range_is_empty() {
    let mask = solid(2, 2);

    assert!(mask.get(1, 1));
    assert!(!mask.get(-1, 0));
    assert!(!mask.get(0, 2));
    assert!(!mask.get(5, 5));
}

#[test]
fn test_overlap_with_offset() {
    let a = solid(2, 2);
    let b = solid(2, 2);

    assert_eq!(a.overlap(&b, (0, 0)), Some((0, 0)));
    assert_eq!(a.overlap(&b, (1, 1)), Some((1, 1)));
    assert_eq!(a.overlap(&b, (-1, -1)), Some((0, 0)));
    assert_eq!(a.overlap(&b, (2, 0)), None);
    assert_eq!(a.overlap(&b, (0, -2)), None);
}

#[test]
fn test_overlap_ignores_transparent_pixels() {
    let mut a = Mask::new(3, 1);
    a.set(0, 0, true);
    let mut b = Mask::new(3, 1);
    b.set(2, 0, true);

    assert!(!a.overlaps(&b, (0, 0)));
    assert!(a.overlaps(&b, (-2, 0)));
}

#[test]
fn test_flip_mirrors_rows() {
    let mut mask = Mask::new(1, 3);
    mask.set(0, 0, true);

    let flipped = mask.flipped_vertically();
    assert!(!flipped.get(0, 0));
    assert!(flipped.get(0, 2));
    assert_eq!(flipped.flipped_vertically(), mask);
}

#[test]
fn test_sprite_sheet_masks() {
    let sheet = SpriteSheet::new();

    let bird = sheet.bird_mask();
    assert_eq!(bird.width(), sprites::BIRD_WIDTH);
    assert_eq!(bird.height(), sprites::BIRD_HEIGHT);
    assert!(bird.count() > 0);
    // corners of the sprite are transparent
    assert!(!bird.get(0, 0));

    assert_eq!(sheet.pipe_top_mask(), &sheet.pipe_bottom_mask().flipped_vertically());
    assert_eq!(sheet.pipe_top.mask(), *sheet.pipe_top_mask());
}

#[test]
fn test_bird_frames_share_one_mask() {
    let sheet = SpriteSheet::new();

    for frame in &sheet.bird_frames {
        assert_eq!(frame.mask(), *sheet.bird_mask());
    }
}

#[test]
fn test_bird_frame_cycle() {
    let frames: Vec<usize> = (0..20)
        .step_by(sprites::ANIMATION_TIME as usize)
        .map(|tick| sprites::bird_frame(tick, 0.0))
        .collect();
    assert_eq!(frames, vec![0, 1, 2, 1]);

    assert_eq!(sprites::bird_frame(0, -90.0), 1);
}
