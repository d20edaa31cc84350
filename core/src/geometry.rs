// core/src/geometry.rs
//
// Rene geometriske hjelpere for kriterie-evaluering. Alle funksjoner
// er tilstandsløse og opererer på normaliserte 2D-koordinater
// (y vokser nedover). Synlighet er kallerens ansvar.

/// Vinkel i grader [0, 180] ved leddpunktet `b`, dannet av strålene
/// mot `a` og `c`. Dot-produkt/arccos-formen med klemt cosinus er
/// numerisk stabil nær kolineære punkter (atan2-differanse er ikke).
/// Degenerert inndata (sammenfallende punkter) gir 0° – et ødelagt
/// ledd skal aldri kunne premieres som "strakt".
pub fn joint_angle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    let u = (a.0 - b.0, a.1 - b.1);
    let v = (c.0 - b.0, c.1 - b.1);

    let nu = (u.0 * u.0 + u.1 * u.1).sqrt();
    let nv = (v.0 * v.0 + v.1 * v.1).sqrt();
    if nu < 1e-9 || nv < 1e-9 {
        return 0.0;
    }

    let cos = ((u.0 * v.0 + u.1 * v.1) / (nu * nv)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Hvor høyt `p` ligger over `q` i normaliserte enheter. Positiv når
/// `p` er høyere i bildet (mindre y). Tilsvarer originalmålet
/// `hofte.y − kne.y` for "kne løftet over hofte".
#[inline]
pub fn vertical_rise(p: (f64, f64), q: (f64, f64)) -> f64 {
    q.1 - p.1
}

/// Absolutt avstand mellom x-midtpunktet av ett par og x-midtpunktet
/// av et annet (skulder-over-hofte-balanse).
#[inline]
pub fn horizontal_alignment(
    left: (f64, f64),
    right: (f64, f64),
    left_ref: (f64, f64),
    right_ref: (f64, f64),
) -> f64 {
    let mid = (left.0 + right.0) / 2.0;
    let mid_ref = (left_ref.0 + right_ref.0) / 2.0;
    (mid - mid_ref).abs()
}

/// Horisontal avstand fra et punkt til en referanse-senterlinje
/// (klassifiserer "kne trukket innover vs. utover").
#[inline]
pub fn center_offset(x: f64, center_x: f64) -> f64 {
    (x - center_x).abs()
}

/// L1-avstand mellom to punkter (fot-nær-kne-målet fra originalen).
#[inline]
pub fn manhattan_distance(p: (f64, f64), q: (f64, f64)) -> f64 {
    (p.0 - q.0).abs() + (p.1 - q.1).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_angle() {
        let angle = joint_angle((1.0, 0.0), (0.0, 0.0), (0.0, 1.0));
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_straight_line_is_180() {
        let angle = joint_angle((0.0, 0.0), (0.5, 0.0), (1.0, 0.0));
        assert!((angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_near_collinear_is_stable() {
        // Nesten kolineære punkter der flyttall kan skyte cos utenfor [-1, 1]
        let a = (0.123456, 0.654321);
        let b = (0.223456, 0.654321000000001);
        let c = (0.323456, 0.654321);
        let angle = joint_angle(a, b, c);
        assert!(angle.is_finite());
        assert!(angle > 179.0 && angle <= 180.0);
    }

    #[test]
    fn test_degenerate_is_zero() {
        assert_eq!(joint_angle((0.5, 0.5), (0.5, 0.5), (1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_vertical_rise_inverted_y() {
        // p over q på skjermen => mindre y => positiv stigning
        assert!(vertical_rise((0.5, 0.3), (0.5, 0.6)) > 0.0);
        assert!((vertical_rise((0.5, 0.3), (0.5, 0.6)) - 0.3).abs() < 1e-12);
        assert!(vertical_rise((0.5, 0.8), (0.5, 0.6)) < 0.0);
    }

    #[test]
    fn test_horizontal_alignment_midpoints() {
        let d = horizontal_alignment((0.40, 0.3), (0.60, 0.3), (0.44, 0.6), (0.60, 0.6));
        assert!((d - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_manhattan() {
        assert!((manhattan_distance((0.1, 0.2), (0.3, 0.5)) - 0.5).abs() < 1e-12);
    }
}
