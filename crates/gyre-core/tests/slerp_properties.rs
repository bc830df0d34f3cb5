// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use gyre_core::{Quaternion, Vec3};
use proptest::prelude::*;

const TOLERANCE: f32 = 1e-4;

fn unit_quaternion() -> impl Strategy<Value = Quaternion> {
    prop::array::uniform4(-1.0f32..1.0)
        .prop_filter("too close to zero to normalize", |c| {
            c.iter().map(|x| x * x).sum::<f32>() > 0.01
        })
        .prop_map(|c| Quaternion::from_array(c).normalize())
}

fn vector() -> impl Strategy<Value = Vec3> {
    prop::array::uniform3(-10.0f32..10.0).prop_map(Vec3::from_array)
}

proptest! {
    #[test]
    fn slerp_of_identical_endpoints_is_constant(a in unit_quaternion(), t in 0.0f32..=1.0) {
        prop_assert!(Quaternion::slerp(a, a, t).approx_eq(a, TOLERANCE));
    }

    #[test]
    fn slerp_hits_both_endpoints(a in unit_quaternion(), b in unit_quaternion()) {
        prop_assert!(Quaternion::slerp(a, b, 0.0).approx_eq(a, TOLERANCE));
        prop_assert!(Quaternion::slerp(a, b, 1.0).same_rotation(b, TOLERANCE));
    }

    #[test]
    fn slerp_stays_on_the_unit_sphere(
        a in unit_quaternion(),
        b in unit_quaternion(),
        t in 0.0f32..=1.0,
    ) {
        let q = Quaternion::slerp(a, b, t);
        prop_assert!((q.magnitude() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn slerp_takes_the_shortest_arc(
        a in unit_quaternion(),
        b in unit_quaternion(),
        t in 0.0f32..=1.0,
    ) {
        let b = if a.dot(b) < 0.0 { b } else { -b };
        prop_assume!(a.dot(b) < 0.0);
        let direct = Quaternion::slerp(a, b, t);
        let flipped = Quaternion::slerp(a, -b, t);
        prop_assert!(direct.approx_eq(flipped, TOLERANCE));
    }

    #[test]
    fn slerp_of_nearly_equal_endpoints_is_finite(
        a in unit_quaternion(),
        nudge in prop::array::uniform4(-1e-4f32..1e-4),
    ) {
        let b = (a + Quaternion::from_array(nudge)).normalize();
        let mid = Quaternion::slerp(a, b, 0.5);
        prop_assert!(mid.to_array().iter().all(|c| c.is_finite()));
        let linear_mid = ((a + b) * 0.5).normalize();
        prop_assert!(mid.approx_eq(linear_mid, TOLERANCE));
    }

    #[test]
    fn identity_rotation_leaves_vectors_alone(p in vector()) {
        prop_assert_eq!(Quaternion::IDENTITY.rotate(p), p);
    }

    #[test]
    fn rotation_round_trips_through_conjugate(q in unit_quaternion(), p in vector()) {
        let back = q.rotate(q.conjugate().rotate(p));
        prop_assert!((back - p).length() < 1e-3 * (1.0 + p.length()));
    }

    #[test]
    fn rotation_preserves_length(q in unit_quaternion(), p in vector()) {
        prop_assert!((q.rotate(p).length() - p.length()).abs() < 1e-3 * (1.0 + p.length()));
    }

    #[test]
    fn composition_applies_right_operand_first(
        a in unit_quaternion(),
        b in unit_quaternion(),
        p in vector(),
    ) {
        let composed = (a * b).rotate(p);
        let sequential = a.rotate(b.rotate(p));
        prop_assert!((composed - sequential).length() < 1e-3 * (1.0 + p.length()));
    }
}
