//! Associated Legendre polynomials and real spherical harmonics.

/// Associated Legendre polynomial `P_l^m(x)` for `0 <= m <= l` and `-1 <= x <= 1`, including the
/// Condon-Shortley phase.
///
/// Uses the upward recurrence in `l` starting from `P_m^m` and `P_{m+1}^m`, which stays stable
/// for the degrees used here. Returns 0 when `m > l`.
pub fn associated_legendre(l: u32, m: u32, x: f64) -> f64 {
    if m > l {
        return 0.0;
    }

    // P_m^m = (-1)^m (2m - 1)!! (1 - x^2)^(m/2)
    let mut pmm = 1.0;
    if m > 0 {
        let somx2 = ((1.0 - x) * (1.0 + x)).sqrt();
        let mut fact = 1.0;
        for _ in 0..m {
            pmm = -pmm * fact * somx2;
            fact += 2.0;
        }
    }
    if l == m {
        return pmm;
    }

    // P_{m+1}^m
    let mut pmmp1 = x * (2 * m + 1) as f64 * pmm;
    if l == m + 1 {
        return pmmp1;
    }

    let mut pll = 0.0;
    for ll in (m + 2)..=l {
        pll = (x * (2 * ll - 1) as f64 * pmmp1 - (ll + m - 1) as f64 * pmm) / (ll - m) as f64;
        pmm = pmmp1;
        pmmp1 = pll;
    }
    pll
}

/// `P_l^m` for negative order, through `P_l^-m = (-1)^m (l - m)! / (l + m)! P_l^m`.
fn associated_legendre_signed(l: u32, m: i32, x: f64) -> f64 {
    let order = m.unsigned_abs();
    let p = associated_legendre(l, order, x);
    if m >= 0 || order > l {
        return p;
    }
    // (l - m)! / (l + m)! as a product, to avoid forming either factorial
    let ratio: f64 = ((l - order + 1)..=(l + order))
        .map(|k| 1.0 / k as f64)
        .product();
    let sign = if order % 2 == 0 { 1.0 } else { -1.0 };
    sign * ratio * p
}

/// Real and imaginary parts of the (unnormalised) spherical harmonic `Y_l^m(theta, phi)`.
///
/// The first element multiplies the cosine coefficient of the expansion and the second the sine
/// coefficient.
pub fn real_harmonic(l: u32, m: i32, theta: f64, phi: f64) -> (f64, f64) {
    let phase = if m >= 0 || m % 2 == 0 { 1.0 } else { -1.0 };
    let ylm = phase * associated_legendre_signed(l, m, theta.cos());
    let m_phi = m as f64 * phi;
    (ylm * m_phi.cos(), ylm * m_phi.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;
    use std::f64::consts::PI;

    const XS: [f64; 5] = [-0.9, -0.3, 0.0, 0.45, 0.8];

    #[test]
    fn diagonal_closed_forms() {
        for x in XS {
            let s = (1.0 - x * x).sqrt();
            assert_eq!(associated_legendre(0, 0, x), 1.0);
            assert!(is_close!(associated_legendre(1, 1, x), -s));
            assert!(is_close!(associated_legendre(2, 2, x), 3.0 * s * s));
            assert!(is_close!(associated_legendre(3, 3, x), -15.0 * s * s * s));
        }
    }

    #[test]
    fn off_diagonal_closed_forms() {
        for x in XS {
            let s = (1.0 - x * x).sqrt();
            assert!(is_close!(associated_legendre(1, 0, x), x, abs_tol = 1e-15));
            assert!(is_close!(associated_legendre(2, 1, x), -3.0 * x * s, abs_tol = 1e-15));
            assert!(is_close!(
                associated_legendre(2, 0, x),
                0.5 * (3.0 * x * x - 1.0),
                abs_tol = 1e-15
            ));
            assert!(is_close!(
                associated_legendre(3, 0, x),
                0.5 * (5.0 * x * x * x - 3.0 * x),
                abs_tol = 1e-15
            ));
            assert!(is_close!(
                associated_legendre(3, 2, x),
                15.0 * x * s * s,
                abs_tol = 1e-14
            ));
        }
    }

    #[test]
    fn order_above_degree() {
        assert_eq!(associated_legendre(2, 3, 0.5), 0.0);
    }

    #[test]
    fn legendre_at_one() {
        // P_l(1) = 1 and every P_l^m(1) with m > 0 vanishes
        for l in 0..=6 {
            assert!(is_close!(associated_legendre(l, 0, 1.0), 1.0));
            for m in 1..=l {
                assert_eq!(associated_legendre(l, m, 1.0), 0.0);
            }
        }
    }

    #[test]
    fn harmonic_zero_order_is_real() {
        let (re, im) = real_harmonic(3, 0, 0.7, 1.3);
        assert!(is_close!(re, associated_legendre(3, 0, 0.7_f64.cos())));
        assert_eq!(im, 0.0);
    }

    #[test]
    fn harmonic_positive_order() {
        let (theta, phi) = (PI / 3.0, PI / 4.0);
        let p = associated_legendre(2, 1, theta.cos());
        let (re, im) = real_harmonic(2, 1, theta, phi);
        assert!(is_close!(re, p * phi.cos()));
        assert!(is_close!(im, p * phi.sin()));
    }

    #[test]
    fn harmonic_negative_order() {
        // Y_1^-1 = (-1) * P_1^-1 * e^{-i phi} with P_1^-1 = -P_1^1 / 2
        let (theta, phi) = (PI / 3.0, PI / 4.0);
        let p11 = associated_legendre(1, 1, theta.cos());
        let (re, im) = real_harmonic(1, -1, theta, phi);
        assert!(is_close!(re, 0.5 * p11 * phi.cos()));
        assert!(is_close!(im, -0.5 * p11 * phi.sin()));
    }
}
