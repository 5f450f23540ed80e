use super::*;

#[test]
fn fnv_hash_is_stable_across_chunking() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"cells");
    let mut b = Fnv1a64::new_default();
    b.write_u8(b'c');
    b.write_bytes(b"ells");
    assert_eq!(a.finish(), b.finish());

    let mut c = Fnv1a64::new_default();
    c.write_f64(1.5);
    let mut d = Fnv1a64::new_default();
    d.write_u64(1.5f64.to_bits());
    assert_eq!(c.finish(), d.finish());
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn lerp_endpoints_are_exact() {
    assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
    assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    assert_eq!(
        lerp_point(Point::new(0.0, 0.0), Point::new(10.0, -4.0), 0.5),
        Point::new(5.0, -2.0)
    );
}

#[test]
fn lerp_rgba_blends_each_channel() {
    let a = Rgba8::rgba(0, 100, 200, 0);
    let b = Rgba8::rgba(200, 100, 0, 255);
    assert_eq!(lerp_rgba(a, b, 0.0), a);
    assert_eq!(lerp_rgba(a, b, 1.0), b);
    assert_eq!(lerp_rgba(a, b, 0.5), Rgba8::rgba(100, 100, 100, 128));
}
