use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Stable identity of an API.
///
/// An `ApiId` survives across catalog versions: the same namespace, type,
/// or member keeps the same id in every framework and package that
/// declares it. Markup tokens use it to reference the entity they name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiId(Uuid);

impl ApiId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Allocate a fresh random id (builders and tests).
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Short representation (first 8 hex characters).
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl fmt::Debug for ApiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiId({})", self.short())
    }
}

impl fmt::Display for ApiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| TypeError::InvalidApiId(s.to_string()))
    }
}

/// What kind of entity an API node describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiKind {
    Namespace,
    Interface,
    Delegate,
    Enum,
    Struct,
    Class,
    Constructor,
    Destructor,
    Operator,
    Property,
    PropertyGetter,
    PropertySetter,
    Method,
    Field,
    EnumItem,
    Constant,
    Event,
    EventAdder,
    EventRemover,
    EventRaiser,
}

impl ApiKind {
    /// Returns `true` for type-like kinds.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            Self::Interface | Self::Delegate | Self::Enum | Self::Struct | Self::Class
        )
    }

    /// Returns `true` for members of a type.
    pub fn is_member(&self) -> bool {
        !matches!(self, Self::Namespace) && !self.is_type()
    }

    /// Returns `true` for accessors that belong to a property or event.
    pub fn is_accessor(&self) -> bool {
        matches!(
            self,
            Self::PropertyGetter
                | Self::PropertySetter
                | Self::EventAdder
                | Self::EventRemover
                | Self::EventRaiser
        )
    }

    /// Whether rendering this node brackets its children (`{` ... `}`).
    ///
    /// Namespaces and every type except delegates contain members.
    pub fn can_contain_members(&self) -> bool {
        match self {
            Self::Namespace => true,
            Self::Delegate => false,
            other => other.is_type(),
        }
    }

    /// Grouping rank used by the canonical API order:
    /// namespaces first, then types, then members.
    pub fn sort_rank(&self) -> u8 {
        if matches!(self, Self::Namespace) {
            0
        } else if self.is_type() {
            1
        } else {
            2
        }
    }
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegate_is_type_but_not_container() {
        assert!(ApiKind::Delegate.is_type());
        assert!(!ApiKind::Delegate.can_contain_members());
    }

    #[test]
    fn namespace_and_class_contain_members() {
        assert!(ApiKind::Namespace.can_contain_members());
        assert!(ApiKind::Class.can_contain_members());
        assert!(ApiKind::Enum.can_contain_members());
        assert!(!ApiKind::Method.can_contain_members());
    }

    #[test]
    fn member_classification() {
        assert!(ApiKind::Method.is_member());
        assert!(ApiKind::PropertyGetter.is_member());
        assert!(ApiKind::PropertyGetter.is_accessor());
        assert!(!ApiKind::Namespace.is_member());
        assert!(!ApiKind::Struct.is_member());
    }

    #[test]
    fn sort_rank_groups_namespaces_types_members() {
        assert!(ApiKind::Namespace.sort_rank() < ApiKind::Class.sort_rank());
        assert!(ApiKind::Interface.sort_rank() < ApiKind::Field.sort_rank());
        assert_eq!(ApiKind::Class.sort_rank(), ApiKind::Delegate.sort_rank());
    }

    #[test]
    fn api_id_parse_roundtrip() {
        let id = ApiId::random();
        let parsed: ApiId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn api_id_rejects_garbage() {
        let err = "not-a-uuid".parse::<ApiId>().unwrap_err();
        assert!(matches!(err, TypeError::InvalidApiId(_)));
    }

    #[test]
    fn api_id_serializes_as_plain_uuid() {
        let id = ApiId::random();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }

    #[test]
    fn short_is_8_chars() {
        assert_eq!(ApiId::random().short().len(), 8);
    }
}
