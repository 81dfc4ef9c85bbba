use super::*;

fn frame(v: u8) -> FrameRGBA {
    FrameRGBA {
        width: 4,
        height: 2,
        data: [v, v, v, 255].repeat(8),
        premultiplied: true,
    }
}

fn three_clips(durations: [f64; 3]) -> Timeline {
    let clips = ClipRole::ALL
        .iter()
        .zip(durations)
        .enumerate()
        .map(|(i, (role, d))| Clip::new(*role, frame(40 * (i as u8 + 1)), d))
        .collect();
    Timeline::new(clips).unwrap()
}

#[test]
fn base_durations_sum_to_22() {
    let sum: f64 = ClipRole::ALL.iter().map(|r| r.base_duration()).sum();
    assert_eq!(sum, 22.0);
}

#[test]
fn roles_carry_expected_effects() {
    assert!(matches!(
        ClipRole::Headline.effects().effects()[0],
        Effect::Zoom { base, rate } if base == 1.0 && rate == 0.03
    ));
    assert!(matches!(
        ClipRole::KeyPoints.effects().effects()[0],
        Effect::Zoom { base, rate } if base == 1.02 && rate == 0.02
    ));
    let outro = ClipRole::Outro.effects();
    assert_eq!(outro.effects().len(), 2);
    assert!(
        outro
            .effects()
            .iter()
            .all(|e| !matches!(e, Effect::Zoom { .. }))
    );
}

#[test]
fn locate_maps_time_to_clip_and_local_time() {
    let tl = three_clips([6.0, 10.0, 6.0]);
    assert_eq!(tl.locate(0.0), (0, 0.0));
    assert_eq!(tl.locate(5.5), (0, 5.5));
    assert_eq!(tl.locate(6.0), (1, 0.0));
    assert_eq!(tl.locate(16.5), (2, 0.5));
    assert_eq!(tl.locate(100.0), (2, 6.0));
}

#[test]
fn frame_count_rounds_total_duration() {
    let tl = three_clips([6.0, 10.0, 6.0]);
    assert_eq!(tl.total_duration(), 22.0);
    assert_eq!(tl.frame_count(24), 528);
    assert_eq!(tl.frame_count(30), 660);
}

#[test]
fn clip_boundaries_switch_content_without_blending() {
    let tl = three_clips([2.0, 2.0, 2.0]);
    // Mid-clip frames are fully opaque copies of the outro's slide.
    let mid_outro = tl.render_frame(5 * 10, 10).unwrap();
    assert_eq!(mid_outro.pixel(0, 0), [120, 120, 120, 255]);
    // First frame of each clip starts black from its fade-in.
    let start_second = tl.render_frame(20, 10).unwrap();
    assert_eq!(start_second.pixel(0, 0), [0, 0, 0, 0]);
}

#[test]
fn rejects_non_positive_duration() {
    let clips = vec![
        Clip::new(ClipRole::Headline, frame(1), 6.0),
        Clip::new(ClipRole::KeyPoints, frame(2), 0.0),
        Clip::new(ClipRole::Outro, frame(3), 6.0),
    ];
    assert!(Timeline::new(clips).is_err());
}

#[test]
fn requires_exactly_three_clips_in_role_order() {
    assert!(Timeline::new(Vec::new()).is_err());
    assert!(Timeline::new(vec![Clip::new(ClipRole::Headline, frame(1), 6.0)]).is_err());

    let four = ClipRole::ALL
        .iter()
        .chain([ClipRole::Outro].iter())
        .map(|r| Clip::new(*r, frame(1), 6.0))
        .collect();
    assert!(Timeline::new(four).is_err());

    let swapped = vec![
        Clip::new(ClipRole::KeyPoints, frame(1), 6.0),
        Clip::new(ClipRole::Headline, frame(1), 6.0),
        Clip::new(ClipRole::Outro, frame(1), 6.0),
    ];
    assert!(Timeline::new(swapped).is_err());
}

#[test]
fn rejects_mixed_frame_sizes() {
    let mut odd = frame(1);
    odd.width = 2;
    odd.data.truncate(2 * 2 * 4);
    let clips = vec![
        Clip::new(ClipRole::Headline, frame(1), 1.0),
        Clip::new(ClipRole::KeyPoints, odd, 1.0),
        Clip::new(ClipRole::Outro, frame(1), 1.0),
    ];
    assert!(Timeline::new(clips).is_err());
}

#[test]
fn render_frame_rejects_zero_fps() {
    let tl = three_clips([6.0, 10.0, 6.0]);
    assert!(tl.render_frame(0, 0).is_err());
}
