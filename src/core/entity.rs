//! # Entity
//!
//! The closed set of objects a workspace can hold.
//!
//! Every variant carries an Identity, so the workspace can manage any of
//! them uniformly through `Identified`. Getting a concrete kind back out is
//! a checked conversion that reports `TypeMismatch`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::contour::Contour;
use super::error::GeometryError;
use super::id::{Identified, Identity};
use super::point::Point;
use super::segment::Segment;
use super::vector::Vector;

/// A bare named object with no geometry
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Label {
    identity: Identity,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(name),
        }
    }
}

impl Identified for Label {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any identity-bearing domain object
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Entity {
    Label(Label),
    Vector(Vector),
    Point(Point),
    Segment(Segment),
    Contour(Contour),
}

impl Entity {
    /// Kind name, for messages and listings
    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Label(_) => "label",
            Entity::Vector(_) => "vector",
            Entity::Point(_) => "point",
            Entity::Segment(_) => "segment",
            Entity::Contour(_) => "contour",
        }
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Entity::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Entity::Point(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            Entity::Segment(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_contour(&self) -> Option<&Contour> {
        match self {
            Entity::Contour(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_contour_mut(&mut self) -> Option<&mut Contour> {
        match self {
            Entity::Contour(c) => Some(c),
            _ => None,
        }
    }
}

impl Identified for Entity {
    fn identity(&self) -> &Identity {
        match self {
            Entity::Label(x) => x.identity(),
            Entity::Vector(x) => x.identity(),
            Entity::Point(x) => x.identity(),
            Entity::Segment(x) => x.identity(),
            Entity::Contour(x) => x.identity(),
        }
    }

    fn identity_mut(&mut self) -> &mut Identity {
        match self {
            Entity::Label(x) => x.identity_mut(),
            Entity::Vector(x) => x.identity_mut(),
            Entity::Point(x) => x.identity_mut(),
            Entity::Segment(x) => x.identity_mut(),
            Entity::Contour(x) => x.identity_mut(),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Label(x) => fmt::Display::fmt(x, f),
            Entity::Vector(x) => fmt::Display::fmt(x, f),
            Entity::Point(x) => fmt::Display::fmt(x, f),
            Entity::Segment(x) => fmt::Display::fmt(x, f),
            Entity::Contour(x) => fmt::Display::fmt(x, f),
        }
    }
}

macro_rules! entity_conversions {
    ($($variant:ident => $kind:literal),* $(,)?) => {
        $(
            impl From<$variant> for Entity {
                fn from(value: $variant) -> Self {
                    Entity::$variant(value)
                }
            }

            impl TryFrom<Entity> for $variant {
                type Error = GeometryError;

                fn try_from(entity: Entity) -> Result<Self, Self::Error> {
                    match entity {
                        Entity::$variant(value) => Ok(value),
                        other => Err(GeometryError::TypeMismatch {
                            expected: $kind,
                            found: other.kind(),
                        }),
                    }
                }
            }
        )*
    };
}

entity_conversions! {
    Label => "label",
    Vector => "vector",
    Point => "point",
    Segment => "segment",
    Contour => "contour",
}
