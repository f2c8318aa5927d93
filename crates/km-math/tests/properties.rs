//! Algebraic properties of `Vec3` and the transforms, checked over random
//! inputs.
//!
//! Components are drawn from a bounded range so sums and products stay far
//! from overflow; tolerances scale with the magnitudes involved.

use approx::RelativeEq;
use proptest::prelude::*;

use km_math::{Mat4, Vec3};

fn component() -> impl Strategy<Value = f32> {
    -100.0f32..100.0
}

fn vec3() -> impl Strategy<Value = Vec3> {
    prop::array::uniform3(component()).prop_map(Vec3::from_array)
}

/// Any finite f32, including values whose squares overflow.
fn wide_component() -> impl Strategy<Value = f32> {
    any::<f32>().prop_filter("finite", |v| v.is_finite())
}

fn wide_vec3() -> impl Strategy<Value = Vec3> {
    prop::array::uniform3(wide_component()).prop_map(Vec3::from_array)
}

fn scale_component() -> impl Strategy<Value = f32> {
    prop_oneof![-10.0f32..-0.1, 0.1f32..10.0]
}

/// Scale followed by translation; always invertible.
fn affine() -> impl Strategy<Value = Mat4> {
    (prop::array::uniform3(scale_component()), vec3()).prop_map(|(s, t)| {
        Mat4::from_translation(t) * Mat4::from_scale(Vec3::from_array(s))
    })
}

proptest! {
    #[test]
    fn length_squared_is_self_dot(v in vec3()) {
        prop_assert_eq!(v.length_squared(), v.dot(v));
    }

    #[test]
    fn length_is_non_negative(v in vec3()) {
        prop_assert!(v.length() >= 0.0);
    }

    #[test]
    fn normalize_has_unit_length(v in vec3()) {
        prop_assume!(v.length() > 1e-3);
        let n = v.normalize().unwrap();
        prop_assert!((n.length() - 1.0).abs() < 1e-5, "length {}", n.length());
        // Same direction.
        prop_assert!(n.dot(v) > 0.0);
    }

    #[test]
    fn normalize_has_unit_length_at_any_magnitude(v in wide_vec3()) {
        prop_assume!(v.to_array().iter().any(|c| *c != 0.0));
        let n = v.normalize().unwrap();
        prop_assert!((n.length() - 1.0).abs() < 1e-5, "{:?} -> {:?}", v, n);
        prop_assert!(n.is_finite());
    }

    #[test]
    fn length_is_finite_for_finite_input(v in wide_vec3()) {
        let len = v.length();
        let m = v.x.abs().max(v.y.abs()).max(v.z.abs());
        // The length is at most sqrt(3) times the largest component.
        prop_assume!(m < f32::MAX / 2.0);
        prop_assert!(len.is_finite());
        prop_assert!(len >= m);
    }

    #[test]
    fn dot_is_symmetric(a in vec3(), b in vec3()) {
        prop_assert_eq!(a.dot(b), b.dot(a));
    }

    #[test]
    fn cross_is_anticommutative(a in vec3(), b in vec3()) {
        prop_assert_eq!(a.cross(b), -b.cross(a));
    }

    #[test]
    fn cross_is_perpendicular(a in vec3(), b in vec3()) {
        let c = a.cross(b);
        let tol = 1e-5 * (a.length_squared() * b.length() + 1.0);
        prop_assert!(c.dot(a).abs() <= tol, "c.a = {}", c.dot(a));
        let tol = 1e-5 * (b.length_squared() * a.length() + 1.0);
        prop_assert!(c.dot(b).abs() <= tol, "c.b = {}", c.dot(b));
    }

    #[test]
    fn addition_is_associative(a in vec3(), b in vec3(), c in vec3()) {
        prop_assert_eq!((a + b) + c, a + (b + c));
    }

    #[test]
    fn scalar_multiplication_distributes(s in -10.0f32..10.0, a in vec3(), b in vec3()) {
        let lhs = s * (a + b);
        let rhs = s * a + s * b;
        prop_assert!(lhs.relative_eq(&rhs, 1e-3, 1e-5), "{:?} vs {:?}", lhs, rhs);
    }

    #[test]
    fn scalar_multiplication_commutes(s in -10.0f32..10.0, v in vec3()) {
        prop_assert_eq!(s * v, v * s);
    }

    #[test]
    fn equality_is_reflexive_and_symmetric(a in vec3(), b in vec3()) {
        prop_assert!(a == a);
        prop_assert_eq!(a == b, b == a);
    }

    #[test]
    fn checked_division_inverts_multiplication(s in scale_component(), v in vec3()) {
        let back = (v * s).try_div_scalar(s).unwrap();
        prop_assert!(back.relative_eq(&v, 1e-4, 1e-5), "{:?} vs {:?}", back, v);
    }

    #[test]
    fn inverse_transform_round_trips(m in affine(), p in vec3()) {
        let back = p.transform(&m).inverse_transform(&m).unwrap();
        prop_assert!(back.relative_eq(&p, 1e-2, 1e-3), "{:?} vs {:?}", back, p);

        let dir = p.transform_normal(&m).inverse_transform_normal(&m).unwrap();
        prop_assert!(dir.relative_eq(&p, 1e-2, 1e-3), "{:?} vs {:?}", dir, p);
    }

    #[test]
    fn transform_coord_matches_transform_for_affine(m in affine(), p in vec3()) {
        prop_assert!(p.transform_coord(&m).unwrap().relative_eq(&p.transform(&m), 1e-4, 1e-6));
    }

    #[test]
    fn transform_normal_ignores_translation(t in vec3(), d in vec3()) {
        prop_assert_eq!(d.transform_normal(&Mat4::from_translation(t)), d);
    }
}
