use super::*;

fn solid(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

fn quadrants(w: u32, h: u32) -> FrameRGBA {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            let v = if (x < w / 2) ^ (y < h / 2) { 255 } else { 0 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    FrameRGBA {
        width: w,
        height: h,
        data,
        premultiplied: true,
    }
}

#[test]
fn fade_in_ramps_linearly() {
    let e = Effect::FadeIn { duration: 0.6 };
    assert_eq!(e.opacity_at(0.0, 6.0), 0.0);
    assert!((e.opacity_at(0.3, 6.0) - 0.5).abs() < 1e-9);
    assert_eq!(e.opacity_at(0.6, 6.0), 1.0);
    assert_eq!(e.opacity_at(3.0, 6.0), 1.0);
}

#[test]
fn fade_out_ramps_at_clip_end() {
    let e = Effect::FadeOut { duration: 0.8 };
    assert_eq!(e.opacity_at(1.0, 6.0), 1.0);
    assert!((e.opacity_at(5.6, 6.0) - 0.5).abs() < 1e-9);
    assert_eq!(e.opacity_at(6.0, 6.0), 0.0);
}

#[test]
fn zero_length_fade_is_a_no_op() {
    let e = Effect::FadeIn { duration: 0.0 };
    assert_eq!(e.opacity_at(0.0, 6.0), 1.0);
}

#[test]
fn zoom_scale_grows_with_time() {
    let e = Effect::Zoom {
        base: 1.0,
        rate: 0.03,
    };
    assert_eq!(e.scale_at(0.0), 1.0);
    assert!((e.scale_at(2.0) - 1.06).abs() < 1e-12);
    assert_eq!(e.opacity_at(2.0, 6.0), 1.0);
}

#[test]
fn faded_frame_is_black_at_start() {
    let frame = solid(8, 4, [200, 100, 50, 255]);
    let out = Effect::FadeIn { duration: 1.0 }
        .apply(&frame, 0.0, 6.0)
        .unwrap();
    assert!(out.data.iter().all(|&c| c == 0));
    assert!(out.premultiplied);
}

#[test]
fn half_fade_halves_premultiplied_channels() {
    let frame = solid(4, 4, [200, 100, 50, 255]);
    let out = Effect::FadeOut { duration: 1.0 }
        .apply(&frame, 5.5, 6.0)
        .unwrap();
    let px = out.pixel(1, 1);
    assert_eq!(px, [100, 50, 25, 128]);
}

#[test]
fn unit_zoom_returns_input() {
    let frame = quadrants(16, 8);
    let out = Effect::Zoom {
        base: 1.0,
        rate: 0.0,
    }
    .apply(&frame, 3.0, 6.0)
    .unwrap();
    assert_eq!(out, frame);
}

#[test]
fn zoom_keeps_center_and_pushes_edges_out() {
    let frame = quadrants(64, 64);
    let out = Effect::Zoom {
        base: 2.0,
        rate: 0.0,
    }
    .apply(&frame, 0.0, 6.0)
    .unwrap();
    assert_eq!((out.width, out.height), (64, 64));
    // At 2x about the centre, pixel (8, 8) samples source (20, 20).
    assert_eq!(out.pixel(8, 8), frame.pixel(20, 20));
    assert_eq!(out.pixel(56, 8), frame.pixel(44, 20));
    assert_ne!(out.pixel(8, 8), out.pixel(56, 8));
    assert!(out.data.chunks_exact(4).all(|p| p[3] == 255));
}

#[test]
fn stack_orders_zoom_before_fades() {
    let stack = EffectStack::new(vec![
        Effect::FadeIn { duration: 0.6 },
        Effect::FadeOut { duration: 0.6 },
        Effect::Zoom {
            base: 1.0,
            rate: 0.03,
        },
    ]);
    assert!(matches!(stack.effects()[0], Effect::Zoom { .. }));
    assert!(matches!(stack.effects()[1], Effect::FadeIn { .. }));
    assert!(matches!(stack.effects()[2], Effect::FadeOut { .. }));
}

#[test]
fn stack_combines_opacities() {
    let stack = EffectStack::new(vec![
        Effect::FadeIn { duration: 1.0 },
        Effect::FadeOut { duration: 1.0 },
    ]);
    // A clip shorter than both fades sees them overlap.
    assert!((stack.opacity_at(0.5, 1.0) - 0.25).abs() < 1e-9);
    assert_eq!(stack.opacity_at(3.0, 6.0), 1.0);
}

#[test]
fn applying_twice_gives_identical_frames() {
    let frame = quadrants(32, 18);
    let stack = EffectStack::new(vec![
        Effect::Zoom {
            base: 1.02,
            rate: 0.02,
        },
        Effect::FadeIn { duration: 0.6 },
        Effect::FadeOut { duration: 0.6 },
    ]);
    for t in [0.0, 0.3, 4.0, 9.7] {
        let a = stack.apply(&frame, t, 10.0).unwrap();
        let b = stack.apply(&frame, t, 10.0).unwrap();
        assert_eq!(a, b, "t={t}");
    }
}

#[test]
fn straight_alpha_input_is_premultiplied_first() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![200, 200, 200, 128],
        premultiplied: false,
    };
    let out = Effect::FadeIn { duration: 1.0 }
        .apply(&frame, 2.0, 6.0)
        .unwrap();
    assert!(out.premultiplied);
    assert_eq!(out.pixel(0, 0), [100, 100, 100, 128]);
}
