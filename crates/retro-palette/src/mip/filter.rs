//! Separable tent filter with wrapping edges.

/// Per-output-pixel source taps for one axis: (source index, weight).
type AxisTaps = Vec<Vec<(usize, f32)>>;

/// Precompute the taps that produce `dst` samples from `src` samples.
///
/// The tent radius equals the scale factor `src / dst` (at least one source
/// pixel), centered on each output pixel's center. Taps that fall outside
/// `[0, src)` wrap around, as the texture tiles.
fn axis_taps(src: usize, dst: usize) -> AxisTaps {
    let scale = src as f64 / dst as f64;
    let radius = scale.max(1.0);

    (0..dst)
        .map(|i| {
            let center = (i as f64 + 0.5) * scale;
            let first = (center - radius).floor() as i64;
            let last = (center + radius).ceil() as i64;

            let mut taps = Vec::with_capacity((last - first + 1) as usize);
            let mut total = 0.0f64;
            for j in first..=last {
                let distance = ((j as f64 + 0.5) - center).abs() / radius;
                let weight = 1.0 - distance;
                if weight > 0.0 {
                    taps.push((j.rem_euclid(src as i64) as usize, weight));
                    total += weight;
                }
            }

            taps.into_iter()
                .map(|(index, weight)| (index, (weight / total) as f32))
                .collect()
        })
        .collect()
}

/// Resample an interleaved `channels`-channel image from `src_w x src_h` to
/// `dst_w x dst_h`.
///
/// Callers are responsible for the color space of `pixels`: the filter is a
/// plain weighted average.
pub(crate) fn resample(
    pixels: &[f32],
    channels: usize,
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
) -> Vec<f32> {
    assert_eq!(
        pixels.len(),
        src_w * src_h * channels,
        "resample: buffer length does not match {src_w}x{src_h}x{channels}"
    );

    // Horizontal pass: src_w x src_h -> dst_w x src_h
    let x_taps = axis_taps(src_w, dst_w);
    let mut horizontal = vec![0.0f32; dst_w * src_h * channels];
    for y in 0..src_h {
        let row = &pixels[y * src_w * channels..(y + 1) * src_w * channels];
        for (x, taps) in x_taps.iter().enumerate() {
            let out = &mut horizontal[(y * dst_w + x) * channels..(y * dst_w + x + 1) * channels];
            for &(sx, weight) in taps {
                for c in 0..channels {
                    out[c] += row[sx * channels + c] * weight;
                }
            }
        }
    }

    // Vertical pass: dst_w x src_h -> dst_w x dst_h
    let y_taps = axis_taps(src_h, dst_h);
    let mut output = vec![0.0f32; dst_w * dst_h * channels];
    for (y, taps) in y_taps.iter().enumerate() {
        for &(sy, weight) in taps {
            let src_row = &horizontal[sy * dst_w * channels..(sy + 1) * dst_w * channels];
            let dst_row = &mut output[y * dst_w * channels..(y + 1) * dst_w * channels];
            for (out, &value) in dst_row.iter_mut().zip(src_row) {
                *out += value * weight;
            }
        }
    }

    output
}
