//! Cylindrical Bessel functions of the first kind.
//!
//! Two evaluation regimes: a power series near the origin and Miller's
//! backward recurrence for larger arguments, where the series loses
//! digits to cancellation. Accurate to better than 1e-9 over the range
//! the pattern engine uses (x in [0, 50], order 0-8).

/// Series/recurrence crossover point. Below this the alternating series
/// keeps full precision; above it cancellation starts eating digits.
const SERIES_CUTOFF: f64 = 12.0;

/// Evaluate J_n(x), the Bessel function of the first kind of order `n`.
///
/// Total over all representable inputs: NaN propagates, negative x uses
/// the reflection identity J_n(-x) = (-1)^n J_n(x), and x = 0 returns
/// the exact limit (1 for order 0, otherwise 0).
pub fn bessel_j(order: u32, x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        let v = bessel_j(order, -x);
        return if order % 2 == 0 { v } else { -v };
    }
    if x == 0.0 {
        return if order == 0 { 1.0 } else { 0.0 };
    }
    if x < SERIES_CUTOFF {
        series(order, x)
    } else {
        miller(order, x)
    }
}

/// Power series: J_n(x) = Σ_m (-1)^m (x/2)^(n+2m) / (m! (n+m)!).
fn series(n: u32, x: f64) -> f64 {
    let half = x / 2.0;

    // Leading term (x/2)^n / n!.
    let mut term = 1.0;
    for k in 1..=n {
        term *= half / k as f64;
    }

    let mut sum = term;
    for m in 1..=200u32 {
        term *= -(half * half) / (m as f64 * (m + n) as f64);
        sum += term;
        if term.abs() < sum.abs() * 1e-17 + 1e-300 {
            break;
        }
    }
    sum
}

/// Miller's algorithm: run the three-term recurrence
/// J_{k-1}(x) = (2k/x) J_k(x) - J_{k+1}(x) downward from a start order
/// well above both n and x, then normalize with the identity
/// J_0 + 2 (J_2 + J_4 + ...) = 1.
fn miller(n: u32, x: f64) -> f64 {
    let start = {
        let m = (x.max(n as f64) + 20.0 + 10.0 * (x + n as f64).sqrt()).ceil() as u32;
        m + m % 2
    };

    let mut j_next = 0.0_f64;
    let mut j_cur = 1e-30_f64;
    let mut norm = 0.0_f64;
    let mut result = 0.0_f64;

    let mut k = start;
    while k > 0 {
        let j_prev = (2.0 * k as f64 / x) * j_cur - j_next;
        j_next = j_cur;
        j_cur = j_prev;
        k -= 1;

        // Rescale before the unnormalized recurrence overflows.
        if j_cur.abs() > 1e100 {
            j_cur *= 1e-100;
            j_next *= 1e-100;
            norm *= 1e-100;
            result *= 1e-100;
        }

        if k % 2 == 0 && k > 0 {
            norm += 2.0 * j_cur;
        }
        if k == n {
            result = j_cur;
        }
    }

    norm += j_cur; // j_cur is now the unnormalized J_0
    result / norm
}
