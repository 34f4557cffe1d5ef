//! Real roots of univariate polynomials with floating-point coefficients

const BISECTION_STEPS: usize = 200;
const DISCRIMINANT_TOLERANCE: f64 = 1e-12;
const MULTIPLE_ROOT_TOLERANCE: f64 = 1e-9;
/// Remainders below this share of the dividend end the gcd sequence
const GCD_TOLERANCE: f64 = 1e-10;

fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Sum of the absolute term values at `x`, the scale rounding error is judged against
fn magnitude_at(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, c| acc * x.abs() + c.abs())
}

fn derivative(coefficients: &[f64]) -> Vec<f64> {
    coefficients
        .iter()
        .enumerate()
        .skip(1)
        .map(|(power, c)| c * power as f64)
        .collect()
}

fn trimmed(coefficients: &[f64]) -> &[f64] {
    let scale = coefficients.iter().fold(0.0_f64, |acc, c| acc.max(c.abs()));
    let mut end = coefficients.len();
    while end > 0
        && coefficients
            .get(end - 1)
            .is_some_and(|c| c.abs() <= f64::EPSILON * scale)
    {
        end -= 1;
    }
    coefficients.get(..end).unwrap_or(&[])
}

fn largest_magnitude(coefficients: &[f64]) -> f64 {
    coefficients.iter().fold(0.0, |acc, c| acc.max(c.abs()))
}

fn monic(coefficients: &[f64]) -> Vec<f64> {
    match coefficients.last() {
        Some(&leading) if leading != 0.0 => coefficients.iter().map(|c| c / leading).collect(),
        _ => coefficients.to_vec(),
    }
}

/// Quotient and remainder of polynomial long division
fn divide(dividend: &[f64], divisor: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let Some(&leading) = divisor.last() else {
        return (Vec::new(), dividend.to_vec());
    };
    if dividend.len() < divisor.len() || leading == 0.0 {
        return (Vec::new(), dividend.to_vec());
    }

    let steps = dividend.len() - divisor.len() + 1;
    let mut quotient = vec![0.0; steps];
    let mut remainder = dividend.to_vec();
    for shift in (0..steps).rev() {
        let top = remainder.get(shift + divisor.len() - 1).copied().unwrap_or(0.0);
        let factor = top / leading;
        if let Some(slot) = quotient.get_mut(shift) {
            *slot = factor;
        }
        for (offset, d) in divisor.iter().enumerate() {
            if let Some(slot) = remainder.get_mut(shift + offset) {
                *slot -= factor * d;
            }
        }
    }
    remainder.truncate(divisor.len() - 1);
    (quotient, remainder)
}

/// Monic greatest common divisor, with remainders that vanish up to
/// rounding counted as zero
fn approximate_gcd(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut a = monic(a);
    let mut b = monic(b);
    loop {
        let (_, mut remainder) = divide(&a, &b);
        let negligible = GCD_TOLERANCE * largest_magnitude(&a);
        while remainder.last().is_some_and(|c| c.abs() <= negligible) {
            remainder.pop();
        }
        match remainder.len() {
            0 => return b,
            1 => return vec![1.0],
            _ => {
                a = b;
                b = monic(&remainder);
            }
        }
    }
}

/// The polynomial with every repeated factor reduced to a single one,
/// `None` when it has no repeated factor
///
/// Near a root of multiplicity `m` the polynomial is flat to order `m` and
/// its computed sign is noise, so roots are only bracketed on this part.
fn square_free_part(coefficients: &[f64]) -> Option<Vec<f64>> {
    let gcd = approximate_gcd(coefficients, &derivative(coefficients));
    if gcd.len() < 2 {
        return None;
    }
    let (quotient, _) = divide(coefficients, &gcd);
    Some(quotient)
}

fn normalize_zero(root: f64) -> f64 {
    if root == 0.0 { 0.0 } else { root }
}

fn sorted_unique(mut roots: Vec<f64>) -> Vec<f64> {
    roots.retain(|r| r.is_finite());
    roots.sort_by(f64::total_cmp);
    roots.dedup_by(|a, b| (*a - *b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0));
    roots.into_iter().map(normalize_zero).collect()
}

fn quadratic_roots(c: f64, b: f64, a: f64) -> Vec<f64> {
    let discriminant = b * b - 4.0 * a * c;
    let scale = b * b + (4.0 * a * c).abs();
    if discriminant < -DISCRIMINANT_TOLERANCE * scale {
        return Vec::new();
    }
    let root = discriminant.max(0.0).sqrt();
    let q = -0.5 * (b + b.signum() * root);
    if q == 0.0 {
        return vec![0.0];
    }
    vec![q / a, c / q]
}

fn bisect(coefficients: &[f64], mut low: f64, mut high: f64) -> f64 {
    let low_is_negative = horner(coefficients, low) < 0.0;
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (low + high);
        if mid <= low || mid >= high {
            break;
        }
        let value = horner(coefficients, mid);
        if value == 0.0 {
            return mid;
        }
        if (value < 0.0) == low_is_negative {
            low = mid;
        } else {
            high = mid;
        }
    }
    0.5 * (low + high)
}

/// Distinct real roots in ascending order
///
/// `coefficients[i]` multiplies `x^i`. Degrees one and two use closed forms;
/// higher degrees first drop repeated factors, then bracket roots between the
/// critical points and refine them by bisection. Roots that only touch zero
/// are found at the critical points.
pub(crate) fn real_roots(coefficients: &[f64]) -> Vec<f64> {
    let coefficients = trimmed(coefficients);
    if coefficients.len() > 3
        && let Some(reduced) = square_free_part(coefficients)
    {
        return real_roots(&reduced);
    }
    let roots = match coefficients {
        [] | [_] => Vec::new(),
        [c, b] => vec![-c / b],
        [c, b, a] => quadratic_roots(*c, *b, *a),
        [.., leading] => {
            let bound = 1.0
                + coefficients
                    .iter()
                    .rev()
                    .skip(1)
                    .fold(0.0_f64, |acc, c| acc.max((c / leading).abs()));
            let critical = real_roots(&derivative(coefficients));

            let mut points = vec![-bound];
            points.extend(critical.iter().copied().filter(|p| p.abs() < bound));
            points.push(bound);

            let mut roots: Vec<f64> = critical
                .iter()
                .copied()
                .filter(|p| {
                    horner(coefficients, *p).abs()
                        <= MULTIPLE_ROOT_TOLERANCE * magnitude_at(coefficients, *p)
                })
                .collect();
            for pair in points.windows(2) {
                if let [low, high] = pair {
                    let (f_low, f_high) = (horner(coefficients, *low), horner(coefficients, *high));
                    if f_low == 0.0 {
                        roots.push(*low);
                    } else if f_high != 0.0 && (f_low < 0.0) != (f_high < 0.0) {
                        roots.push(bisect(coefficients, *low, *high));
                    }
                }
            }
            roots
        }
    };
    sorted_unique(roots)
}

#[cfg(test)]
mod tests {
    use super::real_roots;

    fn assert_roots(coefficients: &[f64], expected: &[f64]) {
        let roots = real_roots(coefficients);
        assert_eq!(roots.len(), expected.len(), "roots {:?}", roots);
        for (root, want) in roots.iter().zip(expected) {
            assert!((root - want).abs() < 1e-9, "got {}, expected {}", root, want);
        }
    }

    #[test]
    fn test_constant_has_no_roots() {
        assert!(real_roots(&[]).is_empty());
        assert!(real_roots(&[4.0]).is_empty());
    }

    #[test]
    fn test_linear() {
        assert_roots(&[4.0, 1.0], &[-4.0]);
        assert_roots(&[0.0, 3.0], &[0.0]);
    }

    #[test]
    fn test_quadratic() {
        assert_roots(&[-4.0, 0.0, 1.0], &[-2.0, 2.0]);
        assert_roots(&[4.0, 0.0, 1.0], &[]);
        assert_roots(&[1.0, -2.0, 1.0], &[1.0]);
        assert_roots(&[0.0, 0.0, 1.0], &[0.0]);
    }

    #[test]
    fn test_trailing_zero_coefficients_are_ignored() {
        assert_roots(&[-2.0, 1.0, 0.0, 0.0], &[2.0]);
    }

    #[test]
    fn test_cubic() {
        let s = 5.0_f64.sqrt();
        assert_roots(&[0.0, -5.0, 0.0, 1.0], &[-s, 0.0, s]);
        assert_roots(&[-1.0, 0.0, 0.0, 1.0], &[1.0]);
    }

    #[test]
    fn test_double_root_at_critical_point() {
        // (x - 1)^2 (x + 2)
        assert_roots(&[2.0, -3.0, 0.0, 1.0], &[-2.0, 1.0]);
    }

    #[test]
    fn test_root_of_high_multiplicity_is_found_once() {
        // (x + 1)^24
        let mut coefficients = vec![1.0];
        for _ in 0..24 {
            let mut next = vec![0.0; coefficients.len() + 1];
            for (power, c) in coefficients.iter().enumerate() {
                next[power] += c;
                next[power + 1] += c;
            }
            coefficients = next;
        }
        assert_roots(&coefficients, &[-1.0]);
    }

    #[test]
    fn test_repeated_factors_next_to_simple_roots() {
        // (x - 2)^3 (x + 1) = x^4 - 5x^3 + 6x^2 + 4x - 8
        assert_roots(&[-8.0, 4.0, 6.0, -5.0, 1.0], &[-1.0, 2.0]);
    }

    #[test]
    fn test_square_free_part() {
        // (x - 1)^2 (x + 2)
        let reduced = super::square_free_part(&[2.0, -3.0, 0.0, 1.0]);
        assert_eq!(reduced, Some(vec![-2.0, 1.0, 1.0]));
        assert_eq!(super::square_free_part(&[0.0, -5.0, 0.0, 1.0]), None);
    }

    #[test]
    fn test_quartic_without_real_roots() {
        assert_roots(&[1.0, 0.0, 0.0, 0.0, 1.0], &[]);
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        let roots = real_roots(&[-0.0, 2.0]);
        assert_eq!(roots.len(), 1);
        if let Some(root) = roots.first() {
            assert!(root.is_sign_positive());
        }
    }
}
