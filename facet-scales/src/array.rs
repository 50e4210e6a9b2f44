//! Tick generation over a continuous interval, following the d3 convention
//! of steps that are powers of ten times 1, 2 or 5.

const E10: f32 = 7.071_067_8; // sqrt(50)
const E5: f32 = 3.162_277_7; // sqrt(10)
const E2: f32 = 1.414_213_6; // sqrt(2)

/// Generate approximately `count` nicely-rounded ticks spanning
/// `[start, stop]`. Returns an empty vector for non-positive or NaN counts.
pub fn ticks(start: f32, stop: f32, count: f32) -> Vec<f32> {
    if count <= 0.0 || count.is_nan() {
        return vec![];
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };

    if !(i2 >= i1) {
        return vec![];
    }

    let n = (i2 - i1 + 1.0) as usize;
    let mut ticks = Vec::with_capacity(n);
    for i in 0..n {
        let step_index = if reverse { i2 - i as f32 } else { i1 + i as f32 };
        // Negative inc encodes a fractional step of 1 / -inc
        let value = if inc < 0.0 {
            step_index / -inc
        } else {
            step_index * inc
        };
        ticks.push(value);
    }

    ticks
}

fn tick_spec(start: f32, stop: f32, count: f32) -> (f32, f32, f32) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10.0_f32.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let denom = 10.0_f32.powf(-power) / factor;
        i1 = (start * denom).round();
        i2 = (stop * denom).round();
        if i1 / denom < start {
            i1 += 1.0;
        }
        if i2 / denom > stop {
            i2 -= 1.0;
        }
        inc = -denom;
    } else {
        inc = 10.0_f32.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && 0.5 <= count && count < 2.0 {
        return tick_spec(start, stop, count * 2.0);
    }

    (i1, i2, inc)
}

/// The step between consecutive ticks for the given interval and count.
/// NaN for invalid counts, negative infinity for a degenerate interval.
pub fn tick_increment(start: f32, stop: f32, count: f32) -> f32 {
    if !(count > 0.0) {
        return f32::NAN;
    }
    if start == stop {
        return f32::NEG_INFINITY;
    }

    let step = (stop - start) / count;
    if step == 0.0 {
        return f32::NAN;
    }

    let power = step.log10().floor();
    let error = step / 10.0_f32.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    10.0_f32.powf(power) * factor
}
