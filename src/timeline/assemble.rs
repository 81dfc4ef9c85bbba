use crate::{
    assets::fetch::ImageSource,
    foundation::error::SlidecastResult,
    model::{BulletList, Metadata, SlideSpec},
    render::compositor::Compositor,
    text::script::CLOSING_LINE,
    timeline::clip::{Clip, ClipRole, Timeline},
};

/// Base clip durations, stretched to `target` by growing only the middle clip.
///
/// A target at or below the natural sum leaves every duration as it is.
pub fn stretch_durations(base: [f64; 3], target: f64) -> [f64; 3] {
    let natural: f64 = base.iter().sum();
    let mut out = base;
    if target.is_finite() && target > natural {
        out[1] += target - natural;
    }
    out
}

/// Compose the three slides and lay them out as a timeline.
///
/// The article image (when the metadata names one and it downloads) backs both content
/// slides and is fetched once; every other background comes from a keyword search.
#[tracing::instrument(skip_all, fields(target = target_duration))]
pub fn assemble(
    bullets: &BulletList,
    metadata: &Metadata,
    images: &dyn ImageSource,
    compositor: &Compositor<'_>,
    target_duration: f64,
) -> SlidecastResult<Timeline> {
    let source = metadata.source_label();
    let article = metadata.image_url().and_then(|url| images.fetch_by_url(url));
    if article.is_some() {
        tracing::debug!("using article image for content slides");
    }

    let headline = bullets.first();
    let key_points = bullets.key_points();

    let headline_bg = article
        .clone()
        .unwrap_or_else(|| images.fetch_by_keyword(headline));
    let key_points_bg = article.unwrap_or_else(|| {
        let query = key_points
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        images.fetch_by_keyword(&query)
    });
    let outro_bg = images.fetch_by_keyword(&format!("{source} news update"));

    let slides = [
        (ClipRole::Headline, vec![headline.to_string()], headline_bg),
        (ClipRole::KeyPoints, key_points, key_points_bg),
        (ClipRole::Outro, vec![CLOSING_LINE.to_string()], outro_bg),
    ];

    let durations = stretch_durations(ClipRole::ALL.map(ClipRole::base_duration), target_duration);

    let mut clips = Vec::with_capacity(slides.len());
    for ((role, lines, bg), duration) in slides.into_iter().zip(durations) {
        let spec = SlideSpec::new(role.title(), lines, bg, source, true);
        let frame = compositor.render(&spec)?;
        clips.push(Clip::new(role, frame, duration));
    }

    let timeline = Timeline::new(clips)?;
    tracing::debug!(
        total = timeline.total_duration(),
        durations = ?timeline.durations(),
        "timeline assembled"
    );
    Ok(timeline)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/assemble.rs"]
mod tests;
