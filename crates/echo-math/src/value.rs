// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Type-tagged math values for generic serialization.
//!
//! Generic code (animation tracks, asset writers) stores a [`MathValue`]
//! without knowing the concrete type. The historical class names survive only
//! as serde tags so existing assets keep round-tripping:
//! `{ "className": "Vector3", "value": [1.0, 2.0, 3.0] }`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::tuple::Tuple;
use crate::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Discriminant of a [`MathValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassName {
    /// [`Vec2`].
    Vector2,
    /// [`Vec3`].
    Vector3,
    /// [`Vec4`].
    Vector4,
    /// [`Quat`].
    Quaternion,
    /// [`Mat4`].
    Matrix,
}

impl ClassName {
    /// The wire tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vector2 => Vec2::CLASS_NAME,
            Self::Vector3 => Vec3::CLASS_NAME,
            Self::Vector4 => Vec4::CLASS_NAME,
            Self::Quaternion => Quat::CLASS_NAME,
            Self::Matrix => "Matrix",
        }
    }

    /// Number of floats in the flat representation.
    pub const fn flat_len(self) -> usize {
        match self {
            Self::Vector2 => Vec2::DIMENSION,
            Self::Vector3 => Vec3::DIMENSION,
            Self::Vector4 => Vec4::DIMENSION,
            Self::Quaternion => Quat::DIMENSION,
            Self::Matrix => 16,
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassName {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Vector2" => Ok(Self::Vector2),
            "Vector3" => Ok(Self::Vector3),
            "Vector4" => Ok(Self::Vector4),
            "Quaternion" => Ok(Self::Quaternion),
            "Matrix" => Ok(Self::Matrix),
            other => Err(MathError::UnknownClassName(other.to_owned())),
        }
    }
}

/// Any core math value, tagged by class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "className", content = "value")]
pub enum MathValue {
    /// 2D vector.
    Vector2(Vec2),
    /// 3D vector.
    Vector3(Vec3),
    /// 4D vector.
    Vector4(Vec4),
    /// Quaternion.
    Quaternion(Quat),
    /// 4×4 matrix.
    Matrix(Mat4),
}

impl MathValue {
    /// Class of the contained value.
    pub fn class_name(&self) -> ClassName {
        match self {
            Self::Vector2(_) => ClassName::Vector2,
            Self::Vector3(_) => ClassName::Vector3,
            Self::Vector4(_) => ClassName::Vector4,
            Self::Quaternion(_) => ClassName::Quaternion,
            Self::Matrix(_) => ClassName::Matrix,
        }
    }

    /// Flat float representation (2, 3, 4, 4 or 16 values).
    pub fn to_flat(&self) -> Vec<f32> {
        match self {
            Self::Vector2(v) => v.as_slice().to_vec(),
            Self::Vector3(v) => v.as_slice().to_vec(),
            Self::Vector4(v) => v.as_slice().to_vec(),
            Self::Quaternion(q) => q.as_slice().to_vec(),
            Self::Matrix(m) => m.as_array().to_vec(),
        }
    }

    /// Rebuilds a value of class `class_name` from `values[0..]`.
    ///
    /// Extra trailing values are ignored; too few yield
    /// [`MathError::ArrayTooShort`].
    pub fn from_flat(class_name: ClassName, values: &[f32]) -> Result<Self, MathError> {
        Ok(match class_name {
            ClassName::Vector2 => Self::Vector2(Vec2::from_slice(values, 0)?),
            ClassName::Vector3 => Self::Vector3(Vec3::from_slice(values, 0)?),
            ClassName::Vector4 => Self::Vector4(Vec4::from_slice(values, 0)?),
            ClassName::Quaternion => Self::Quaternion(Quat::from_slice(values, 0)?),
            ClassName::Matrix => Self::Matrix(Mat4::from_array(values, 0)?),
        })
    }

    /// Encodes as JSON.
    pub fn to_json(&self) -> Result<String, MathError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes from JSON.
    pub fn from_json(json: &str) -> Result<Self, MathError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes as CBOR.
    pub fn to_cbor(&self) -> Result<Vec<u8>, MathError> {
        let mut out = Vec::new();
        ciborium::ser::into_writer(self, &mut out).map_err(|e| MathError::Cbor(e.to_string()))?;
        Ok(out)
    }

    /// Decodes from CBOR.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, MathError> {
        ciborium::de::from_reader(bytes).map_err(|e| MathError::Cbor(e.to_string()))
    }
}

impl From<Vec2> for MathValue {
    fn from(value: Vec2) -> Self {
        Self::Vector2(value)
    }
}

impl From<Vec3> for MathValue {
    fn from(value: Vec3) -> Self {
        Self::Vector3(value)
    }
}

impl From<Vec4> for MathValue {
    fn from(value: Vec4) -> Self {
        Self::Vector4(value)
    }
}

impl From<Quat> for MathValue {
    fn from(value: Quat) -> Self {
        Self::Quaternion(value)
    }
}

impl From<Mat4> for MathValue {
    fn from(value: Mat4) -> Self {
        Self::Matrix(value)
    }
}
