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

//! Provides a Quaternion type for representing 3D rotations.

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use super::{Vec3, EPSILON};
use crate::error::MathError;
use crate::report;
use std::fmt;
use std::ops::{Add, Mul, MulAssign, Neg, Sub};

/// Represents a quaternion for 3D rotations.
///
/// A quaternion is stored scalar-first as `(w, x, y, z)`, where `w` is the
/// scalar part and `[x, y, z]` is the vector part. For representing
/// rotations, it should be a "unit quaternion" where `w² + x² + y² + z² = 1`.
/// `q` and `-q` represent the same rotation.
///
/// Raw construction through [`Quaternion::new`] does not normalize. Every
/// operation returns a new value; only the `*=` operator and the `set*`
/// methods modify a quaternion in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Quaternion {
    /// The scalar (real) part.
    pub w: f32,
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quaternion = Quaternion {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Per-component tolerance used by [`Quaternion::approx_eq`] callers that
    /// have no better bound.
    pub const DEFAULT_TOLERANCE: f32 = 1e-4;

    /// Creates a new quaternion from its raw components.
    ///
    /// Note: This does not guarantee a unit quaternion. For creating rotations,
    /// prefer using `from_axis_angle` or other rotation-specific constructors.
    #[inline]
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Creates a quaternion from a `[w, x, y, z]` array. No normalization.
    #[inline]
    pub const fn from_array(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    /// Returns the components as a `[w, x, y, z]` array.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.w, self.x, self.y, self.z]
    }

    /// Creates a quaternion from a scalar part and a vector part.
    #[inline]
    pub const fn from_scalar_vector(w: f32, v: Vec3) -> Self {
        Self::new(w, v.x, v.y, v.z)
    }

    /// Returns the vector part `(x, y, z)`.
    #[inline]
    pub const fn vector(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Overwrites all four components in place. No normalization.
    #[inline]
    pub fn set(&mut self, w: f32, x: f32, y: f32, z: f32) {
        *self = Self::new(w, x, y, z);
    }

    /// Resets this quaternion to the identity in place.
    #[inline]
    pub fn set_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Creates a quaternion representing a rotation around a given axis by a given angle.
    ///
    /// # Arguments
    ///
    /// * `axis`: The axis of rotation. It is normalized before use; a zero
    ///   axis produces the identity.
    /// * `angle_radians`: The angle of rotation in radians.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle_radians: f32) -> Self {
        let normalized_axis = axis.normalize();
        if normalized_axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let (s, c) = (angle_radians * 0.5).sin_cos();
        Self::from_scalar_vector(c, normalized_axis * s)
    }

    /// Rotation of `angle_radians` around the X axis.
    #[inline]
    pub fn from_x_rotation(angle_radians: f32) -> Self {
        let (s, c) = (angle_radians * 0.5).sin_cos();
        Self::new(c, s, 0.0, 0.0)
    }

    /// Rotation of `angle_radians` around the Y axis.
    #[inline]
    pub fn from_y_rotation(angle_radians: f32) -> Self {
        let (s, c) = (angle_radians * 0.5).sin_cos();
        Self::new(c, 0.0, s, 0.0)
    }

    /// Rotation of `angle_radians` around the Z axis.
    ///
    /// This is the "turn left" rotation of a walker standing on the XY plane.
    #[inline]
    pub fn from_z_rotation(angle_radians: f32) -> Self {
        let (s, c) = (angle_radians * 0.5).sin_cos();
        Self::new(c, 0.0, 0.0, s)
    }

    /// Creates a quaternion from Euler angles applied in Z-Y-X order.
    ///
    /// `euler.x` is the roll (about X), `euler.y` the pitch (about Y) and
    /// `euler.z` the yaw (about Z), all in radians. The result equals
    /// `from_z_rotation(yaw) * from_y_rotation(pitch) * from_x_rotation(roll)`.
    pub fn from_euler_zyx(euler: Vec3) -> Self {
        let (sr, cr) = (euler.x * 0.5).sin_cos();
        let (sp, cp) = (euler.y * 0.5).sin_cos();
        let (sy, cy) = (euler.z * 0.5).sin_cos();

        Self {
            w: cr * cp * cy + sr * sp * sy,
            x: sr * cp * cy - cr * sp * sy,
            y: cr * sp * cy + sr * cp * sy,
            z: cr * cp * sy - sr * sp * cy,
        }
    }

    /// Converts a unit quaternion back to Z-Y-X Euler angles `(roll, pitch, yaw)`.
    ///
    /// At gimbal lock the pitch is clamped to `±π/2`.
    pub fn to_euler_zyx(&self) -> Vec3 {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);

        let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));

        let sinp = 2.0 * (w * y - z * x);
        let pitch = if sinp.abs() >= 1.0 {
            super::FRAC_PI_2.copysign(sinp)
        } else {
            sinp.asin()
        };

        let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));

        Vec3::new(roll, pitch, yaw)
    }

    /// Converts a unit quaternion to an `(axis, angle)` pair.
    ///
    /// The angle is in `[0, 2π]`. A rotation with no vector part (the
    /// identity) returns `(Vec3::X, 0.0)`.
    pub fn to_axis_angle(&self) -> (Vec3, f32) {
        let v = self.vector();
        let n = v.length();
        if n < EPSILON {
            (Vec3::X, 0.0)
        } else {
            (v / n, 2.0 * n.atan2(self.w))
        }
    }

    /// Calculates the squared length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a normalized version of the quaternion with a length of 1.
    /// If the quaternion has a near-zero magnitude, it returns the identity quaternion.
    pub fn normalize(&self) -> Self {
        self.try_normalize().unwrap_or(Self::IDENTITY)
    }

    /// Returns a normalized version of the quaternion, or
    /// [`MathError::DegenerateQuaternion`] if its magnitude is near zero.
    pub fn try_normalize(&self) -> Result<Self, MathError> {
        let mag_sq = self.magnitude_squared();
        if mag_sq > EPSILON && mag_sq.is_finite() {
            Ok(*self * (1.0 / mag_sq.sqrt()))
        } else {
            Err(MathError::DegenerateQuaternion {
                magnitude: mag_sq.sqrt(),
            })
        }
    }

    /// Computes the conjugate of the quaternion, which negates the vector part.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Computes the inverse of the quaternion.
    /// For a unit quaternion, the inverse is equal to its conjugate.
    #[inline]
    pub fn inverse(&self) -> Self {
        let mag_squared = self.magnitude_squared();
        if mag_squared > EPSILON {
            self.conjugate() * (1.0 / mag_squared)
        } else {
            Self::IDENTITY
        }
    }

    /// Computes the 4D dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Rotates a 3D vector by this quaternion.
    ///
    /// Computes the vector part of the sandwich product `q * (0, v) * q⁻¹`
    /// with `q⁻¹` taken as the conjugate. For a non-unit quaternion the
    /// rotated vector is additionally scaled by `|q|²`.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let u = self.vector();
        let s = self.w;
        2.0 * u.dot(v) * u + (s * s - u.dot(u)) * v + 2.0 * s * u.cross(v)
    }

    /// Compares two quaternions component-wise within `tolerance`.
    pub fn approx_eq(&self, other: Self, tolerance: f32) -> bool {
        self.abs_diff_eq(&other, tolerance)
    }

    /// Returns `true` if both quaternions represent the same rotation, i.e.
    /// they are equal up to sign within `tolerance`.
    pub fn same_rotation(&self, other: Self, tolerance: f32) -> bool {
        self.approx_eq(other, tolerance) || self.approx_eq(-other, tolerance)
    }

    /// Performs a Spherical Linear Interpolation (Slerp) between two quaternions.
    ///
    /// Slerp provides a smooth, constant-speed interpolation between two rotations,
    /// following the shortest path on the surface of a 4D sphere. If the
    /// endpoints lie in opposite hemispheres, `end` is negated first, so at
    /// `t = 1` the result may be `-end` (the same rotation).
    ///
    /// *   `t` - The interpolation factor, clamped to the `[0.0, 1.0]` range.
    pub fn slerp(start: Self, end: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut cos_half_theta = start.dot(end);
        let mut end_adjusted = end;

        if cos_half_theta < 0.0 {
            cos_half_theta = -cos_half_theta;
            end_adjusted = -end;
        }

        if cos_half_theta >= 1.0 - EPSILON {
            // sin(half_theta) is close to zero here; lerp and renormalize.
            let result = (start * (1.0 - t)) + (end_adjusted * t);
            return result.normalize();
        }

        let half_theta = cos_half_theta.acos();
        // Equal to sqrt(1 - cos²) but keeps both ratios on the same angle,
        // so t = 1 lands exactly on `end_adjusted`.
        let sin_half_theta = half_theta.sin();
        let ratio_a = ((1.0 - t) * half_theta).sin() / sin_half_theta;
        let ratio_b = (t * half_theta).sin() / sin_half_theta;
        (start * ratio_a) + (end_adjusted * ratio_b)
    }
}

/// Composes two rotations: the result applies `b` first, then `a`.
///
/// Equivalent to `a * b`.
#[inline]
pub fn multiply(a: Quaternion, b: Quaternion) -> Quaternion {
    a * b
}

// --- Operator Overloads ---

impl Default for Quaternion {
    /// Returns the identity quaternion, representing no rotation.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Self;
    /// Combines two rotations using the Hamilton product.
    ///
    /// `a * b` applies `b` first and `a` on top of it. Not commutative, and
    /// the result is not renormalized.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        let a = self.vector();
        let b = rhs.vector();
        Self::from_scalar_vector(
            self.w * rhs.w - a.dot(b),
            self.w * b + rhs.w * a + a.cross(b),
        )
    }
}

impl MulAssign<Quaternion> for Quaternion {
    /// In place `self = self * rhs`.
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;
    /// Rotates a `Vec3` by this quaternion. Same as [`Quaternion::rotate`].
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.rotate(rhs)
    }
}

impl Add<Quaternion> for Quaternion {
    type Output = Self;
    /// Adds two quaternions component-wise.
    /// Note: This is not a standard rotation operation.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.w + rhs.w,
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
        )
    }
}

impl Sub<Quaternion> for Quaternion {
    type Output = Self;
    /// Subtracts two quaternions component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(
            self.w - rhs.w,
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
        )
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;
    /// Scales all components of the quaternion by a scalar.
    #[inline]
    fn mul(self, scalar: f32) -> Self::Output {
        Self::new(
            self.w * scalar,
            self.x * scalar,
            self.y * scalar,
            self.z * scalar,
        )
    }
}

impl Neg for Quaternion {
    type Output = Self;
    /// Negates all components. The result represents the same rotation.
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl From<[f32; 4]> for Quaternion {
    #[inline]
    fn from(c: [f32; 4]) -> Self {
        Self::from_array(c)
    }
}

impl fmt::Display for Quaternion {
    /// Renders `(w, x, y, z)`, each field as C's `% 9.6f`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&report::format_quaternion(self))
    }
}

// --- Approximate comparison ---

impl AbsDiffEq for Quaternion {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{FRAC_PI_2, FRAC_PI_4, PI};
    use approx::assert_relative_eq;

    fn quat_approx_eq(q1: Quaternion, q2: Quaternion) -> bool {
        let dot = q1.dot(q2).abs();
        approx::relative_eq!(dot, 1.0, epsilon = EPSILON * 10.0)
    }

    #[test]
    fn test_identity_and_default() {
        let q_ident = Quaternion::IDENTITY;
        assert_eq!(q_ident, Quaternion::default());
        assert_eq!(q_ident.to_array(), [1.0, 0.0, 0.0, 0.0]);
        assert_relative_eq!(q_ident.magnitude(), 1.0, epsilon = EPSILON);

        let mut q = Quaternion::new(0.3, 0.1, -0.2, 0.9);
        q.set_identity();
        assert_eq!(q, Quaternion::IDENTITY);
    }

    #[test]
    fn test_set_does_not_normalize() {
        let mut q = Quaternion::IDENTITY;
        q.set(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q, Quaternion::new(1.0, 2.0, 3.0, 4.0));
        assert_relative_eq!(q.magnitude_squared(), 30.0);
    }

    #[test]
    fn test_from_axis_angle() {
        let angle = FRAC_PI_2;
        let q = Quaternion::from_axis_angle(Vec3::Y, angle);

        let (s, c) = (angle * 0.5).sin_cos();
        assert_relative_eq!(q, Quaternion::new(c, 0.0, s, 0.0), epsilon = EPSILON);
        assert_relative_eq!(q.magnitude(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_from_axis_angle_normalizes_axis() {
        let q = Quaternion::from_axis_angle(Vec3::new(0.0, 5.0, 0.0), FRAC_PI_2);
        assert_relative_eq!(
            q,
            Quaternion::from_y_rotation(FRAC_PI_2),
            epsilon = EPSILON
        );
        assert_eq!(Quaternion::from_axis_angle(Vec3::ZERO, 1.0), Quaternion::IDENTITY);
    }

    #[test]
    fn test_single_axis_rotations() {
        let angle = 0.8;
        assert_relative_eq!(
            Quaternion::from_x_rotation(angle),
            Quaternion::from_axis_angle(Vec3::X, angle),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            Quaternion::from_y_rotation(angle),
            Quaternion::from_axis_angle(Vec3::Y, angle),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            Quaternion::from_z_rotation(angle),
            Quaternion::from_axis_angle(Vec3::Z, angle),
            epsilon = EPSILON
        );

        let left = Quaternion::from_z_rotation(FRAC_PI_2);
        let half = std::f32::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(left, Quaternion::new(half, 0.0, 0.0, half), epsilon = EPSILON);
    }

    #[test]
    fn test_euler_zyx() {
        let euler = Vec3::new(0.3, -0.4, 1.2);
        let q = Quaternion::from_euler_zyx(euler);
        let composed = Quaternion::from_z_rotation(euler.z)
            * Quaternion::from_y_rotation(euler.y)
            * Quaternion::from_x_rotation(euler.x);
        assert_relative_eq!(q, composed, epsilon = EPSILON);
        assert_relative_eq!(q.to_euler_zyx(), euler, epsilon = EPSILON * 10.0);

        assert_relative_eq!(
            Quaternion::from_euler_zyx(Vec3::ZERO),
            Quaternion::IDENTITY
        );
    }

    #[test]
    fn test_euler_gimbal_lock() {
        let q = Quaternion::from_euler_zyx(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let euler = q.to_euler_zyx();
        assert!(euler.y.is_finite());
        assert_relative_eq!(euler.y, FRAC_PI_2, epsilon = 1e-3);
    }

    #[test]
    fn test_axis_angle_roundtrip() {
        let axis = Vec3::new(1.0, -2.0, 0.5).normalize();
        let q = Quaternion::from_axis_angle(axis, 1.2);
        let (axis_out, angle_out) = q.to_axis_angle();
        assert_relative_eq!(axis_out, axis, epsilon = EPSILON * 10.0);
        assert_relative_eq!(angle_out, 1.2, epsilon = EPSILON * 10.0);

        let (axis_id, angle_id) = Quaternion::IDENTITY.to_axis_angle();
        assert_eq!(axis_id, Vec3::X);
        assert_eq!(angle_id, 0.0);
    }

    #[test]
    fn test_conjugate_and_inverse_unit() {
        let axis = Vec3::new(1.0, 2.0, 3.0).normalize();
        let q = Quaternion::from_axis_angle(axis, 0.75);
        let q_conj = q.conjugate();

        assert_relative_eq!(q_conj, q.inverse(), epsilon = EPSILON);
        assert_eq!(q_conj, Quaternion::new(q.w, -q.x, -q.y, -q.z));
    }

    #[test]
    fn test_inverse_non_unit() {
        let q = Quaternion::new(2.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(q.inverse(), Quaternion::new(0.5, 0.0, 0.0, 0.0));
        assert_relative_eq!(q * q.inverse(), Quaternion::IDENTITY, epsilon = EPSILON);
    }

    #[test]
    fn test_multiplication_identity() {
        let q = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        assert_relative_eq!(q * Quaternion::IDENTITY, q, epsilon = EPSILON);
        assert_relative_eq!(Quaternion::IDENTITY * q, q, epsilon = EPSILON);
        assert_eq!(multiply(q, Quaternion::IDENTITY), q * Quaternion::IDENTITY);
    }

    #[test]
    fn test_multiplication_hamilton_units() {
        let i = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        let k = Quaternion::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(i * j, k);
        assert_eq!(j * k, i);
        assert_eq!(k * i, j);
        assert_eq!(j * i, -k);
        assert_eq!(i * i, Quaternion::new(-1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_multiplication_composition() {
        let rot_y = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let rot_x = Quaternion::from_axis_angle(Vec3::X, FRAC_PI_2);
        // Y first, then X on top.
        let combined_rot = rot_x * rot_y;

        let v_after_y = rot_y * Vec3::Z;
        let v_after_y_then_x = rot_x * v_after_y;
        let v_combined = combined_rot * Vec3::Z;

        assert_relative_eq!(v_after_y_then_x, Vec3::X, epsilon = EPSILON);
        assert_relative_eq!(v_combined, v_after_y_then_x, epsilon = EPSILON);
    }

    #[test]
    fn test_two_left_turns_face_backwards() {
        let left = Quaternion::from_z_rotation(FRAC_PI_2);
        let mut orientation = Quaternion::IDENTITY;
        orientation *= left;
        orientation = multiply(left, orientation);

        assert!(quat_approx_eq(orientation, Quaternion::from_z_rotation(PI)));
        assert_relative_eq!(orientation.rotate(Vec3::X), -Vec3::X, epsilon = EPSILON);
    }

    #[test]
    fn test_multiplication_inverse() {
        let axis = Vec3::new(1.0, -2.0, 0.5).normalize();
        let q = Quaternion::from_axis_angle(axis, 1.2);
        let q_inv = q.inverse();

        assert_relative_eq!(q * q_inv, Quaternion::IDENTITY, epsilon = EPSILON);
        assert_relative_eq!(q_inv * q, Quaternion::IDENTITY, epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_and_operator() {
        let q = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let v_expected = Vec3::new(0.0, 0.0, -1.0);

        assert_relative_eq!(q.rotate(Vec3::X), v_expected, epsilon = EPSILON);
        assert_relative_eq!(q * Vec3::X, v_expected, epsilon = EPSILON);

        let left = Quaternion::from_z_rotation(FRAC_PI_2);
        assert_relative_eq!(left.rotate(Vec3::X), Vec3::Y, epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_matches_sandwich_product() {
        let q = Quaternion::from_axis_angle(Vec3::new(0.2, 1.0, -0.7), 2.1);
        let p = Vec3::new(1.5, -0.5, 3.0);
        let sandwich = q * Quaternion::from_scalar_vector(0.0, p) * q.conjugate();
        assert_relative_eq!(q.rotate(p), sandwich.vector(), epsilon = EPSILON * 10.0);
        assert_relative_eq!(sandwich.w, 0.0, epsilon = EPSILON * 10.0);
    }

    #[test]
    fn test_rotate_non_unit_scales() {
        let q = Quaternion::from_z_rotation(FRAC_PI_2) * 2.0;
        // |q|² = 4
        assert_relative_eq!(q.rotate(Vec3::X), Vec3::new(0.0, 4.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_normalization() {
        let q_norm = Quaternion::new(4.0, 1.0, 2.0, 3.0).normalize();
        assert_relative_eq!(q_norm.magnitude(), 1.0, epsilon = EPSILON);
        let s = 30.0_f32.sqrt();
        assert_relative_eq!(
            q_norm,
            Quaternion::new(4.0 / s, 1.0 / s, 2.0 / s, 3.0 / s),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_normalize_zero_quaternion() {
        let q_zero = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(q_zero.normalize(), Quaternion::IDENTITY);
        assert_eq!(
            q_zero.try_normalize(),
            Err(MathError::DegenerateQuaternion { magnitude: 0.0 })
        );
        assert!(Quaternion::new(f32::NAN, 0.0, 0.0, 0.0).try_normalize().is_err());
    }

    #[test]
    fn test_dot_product() {
        let angle = 0.5;
        let q1 = Quaternion::from_axis_angle(Vec3::X, angle);
        let q3 = Quaternion::from_axis_angle(Vec3::Y, angle);
        let q4 = Quaternion::from_axis_angle(Vec3::X, -angle);

        assert_relative_eq!(q1.dot(q1), 1.0, epsilon = EPSILON);
        assert!(q1.dot(q3).abs() < 1.0 - EPSILON);
        assert_relative_eq!(q1.dot(q4), angle.cos(), epsilon = EPSILON);
    }

    #[test]
    fn test_approx_and_same_rotation() {
        let q = Quaternion::from_z_rotation(0.4);
        let nudged = q + Quaternion::new(5e-5, 0.0, -5e-5, 0.0);
        assert!(q.approx_eq(nudged, Quaternion::DEFAULT_TOLERANCE));
        assert!(!q.approx_eq(nudged, 1e-5));
        assert!(!q.approx_eq(-q, Quaternion::DEFAULT_TOLERANCE));
        assert!(q.same_rotation(-q, Quaternion::DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_slerp_endpoints() {
        let q_start = Quaternion::IDENTITY;
        let q_end = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2);

        assert_relative_eq!(Quaternion::slerp(q_start, q_end, 0.0), q_start, epsilon = EPSILON);
        assert_relative_eq!(Quaternion::slerp(q_start, q_end, 1.0), q_end, epsilon = EPSILON);
    }

    #[test]
    fn test_slerp_midpoint() {
        let q_start = Quaternion::IDENTITY;
        let q_end = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2);
        let q_half = Quaternion::slerp(q_start, q_end, 0.5);

        assert_relative_eq!(q_half, Quaternion::from_z_rotation(FRAC_PI_4), epsilon = EPSILON);
        assert_relative_eq!(q_half.magnitude(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_slerp_short_path_handling() {
        let q_start = Quaternion::from_axis_angle(Vec3::Y, -30.0f32.to_radians());
        let q_end = Quaternion::from_axis_angle(Vec3::Y, 170.0f32.to_radians());
        assert!(q_start.dot(q_end) < 0.0);

        let q_mid = Quaternion::slerp(q_start, q_end, 0.5);
        // Midpoint on the shortest path
        let q_expected_mid = Quaternion::from_axis_angle(Vec3::Y, -110.0f32.to_radians());
        assert!(quat_approx_eq(q_mid, q_expected_mid));

        assert_relative_eq!(q_mid * Vec3::X, q_expected_mid * Vec3::X, epsilon = EPSILON);

        // Same samples as interpolating towards the negated endpoint.
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_relative_eq!(
                Quaternion::slerp(q_start, q_end, t),
                Quaternion::slerp(q_start, -q_end, t),
                epsilon = EPSILON
            );
        }

        // t = 1 lands on -end, the same rotation as end.
        let q_t1 = Quaternion::slerp(q_start, q_end, 1.0);
        assert_relative_eq!(q_t1, -q_end, epsilon = EPSILON);
        assert!(q_t1.same_rotation(q_end, EPSILON));
    }

    #[test]
    fn test_slerp_same_quaternion() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.9);
        for t in [0.0, 0.3, 0.5, 1.0] {
            assert_relative_eq!(Quaternion::slerp(q, q, t), q, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_slerp_antipodal_inputs() {
        // q and -q: after the sign flip they coincide, so the lerp branch runs.
        let q = Quaternion::from_x_rotation(1.0);
        let mid = Quaternion::slerp(q, -q, 0.5);
        assert!(mid.w.is_finite() && mid.x.is_finite());
        assert_relative_eq!(mid, q, epsilon = EPSILON);
    }

    #[test]
    fn test_slerp_near_identical_quaternions() {
        let angle1 = 0.00001;
        let angle2 = 0.00002;
        let q_close1 = Quaternion::from_axis_angle(Vec3::Y, angle1);
        let q_close2 = Quaternion::from_axis_angle(Vec3::Y, angle2);
        assert!(q_close1.dot(q_close2) > 1.0 - EPSILON);

        let q_mid = Quaternion::slerp(q_close1, q_close2, 0.5);
        let linear_mid = ((q_close1 + q_close2) * 0.5).normalize();

        assert!(q_mid.to_array().iter().all(|c| c.is_finite()));
        assert_relative_eq!(q_mid.magnitude(), 1.0, epsilon = EPSILON * 10.0);
        assert_relative_eq!(q_mid, linear_mid, epsilon = EPSILON);
    }

    #[test]
    fn test_slerp_clamps_t() {
        let q_start = Quaternion::IDENTITY;
        let q_end = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2);

        assert_relative_eq!(Quaternion::slerp(q_start, q_end, -0.5), q_start, epsilon = EPSILON);
        assert_relative_eq!(Quaternion::slerp(q_start, q_end, 1.5), q_end, epsilon = EPSILON);
    }

    #[test]
    fn test_display_field_order() {
        let q = Quaternion::new(1.0, -0.5, 0.25, 0.0);
        assert_eq!(
            q.to_string(),
            "( 1.000000, -0.500000,  0.250000,  0.000000)"
        );
    }

    #[test]
    fn test_serde_scalar_first() {
        let json = serde_json::to_string(&Quaternion::IDENTITY).unwrap();
        assert_eq!(json, r#"{"w":1.0,"x":0.0,"y":0.0,"z":0.0}"#);
    }
}
