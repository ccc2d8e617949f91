//! Decorators — named metadata blocks attached to agent messages.
//!
//! The decorator set is closed: every known name maps to exactly one shape
//! ([`DecoratorKind`]). On the wire each decorator sits at the top level of the
//! message under its name prefixed with `~`, e.g. `"~thread": {"thid": "..."}`.
//!
//! [`Decorators`] is the bag carried by every message. Its only read and write
//! surface is `add`, `get`, `set` and `find`.

use crate::error::{AriadneError, AriadneResult};
use chrono::{DateTime, Utc};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Prefix marking a top-level wire field as a decorator.
pub const DECORATOR_PREFIX: char = '~';

/// Conversation correlation block (`~thread`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadDecorator {
    /// The conversation this message belongs to.
    #[serde(rename = "thid", default)]
    pub thread_id: String,
    /// The enclosing conversation, if this thread was spawned from another.
    #[serde(rename = "pthid", default, skip_serializing_if = "Option::is_none")]
    pub parent_thread_id: Option<String>,
}

impl ThreadDecorator {
    /// A root thread decorator with no parent.
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            parent_thread_id: None,
        }
    }

    /// Attach a parent thread id.
    pub fn with_parent(mut self, parent_thread_id: impl Into<String>) -> Self {
        self.parent_thread_id = Some(parent_thread_id.into());
        self
    }

    /// The parent thread id, treating an empty string as unset.
    pub fn parent(&self) -> Option<&str> {
        self.parent_thread_id
            .as_deref()
            .filter(|parent| !parent.is_empty())
    }
}

/// Message timing block (`~timing`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingDecorator {
    /// When the sender received the message this one answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_time: Option<DateTime<Utc>>,
    /// When the sender emitted this message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_time: Option<DateTime<Utc>>,
    /// After this instant the message should be discarded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_time: Option<DateTime<Utc>>,
    /// Requested processing delay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_milli: Option<u64>,
}

/// Which replies the sender wants on the inbound connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnRoute {
    /// Replies travel on a separate connection.
    #[default]
    None,
    /// Every reply may use the inbound connection.
    All,
    /// Only replies on `return_route_thread` may use it.
    Thread,
}

/// Transport hints block (`~transport`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportDecorator {
    #[serde(default)]
    pub return_route: ReturnRoute,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_route_thread: Option<String>,
}

/// The closed set of decorator shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecoratorKind {
    Thread,
    Timing,
    Transport,
}

impl DecoratorKind {
    /// Every known decorator kind.
    pub const ALL: [DecoratorKind; 3] = [Self::Thread, Self::Timing, Self::Transport];

    /// Canonical decorator name (without the `~` prefix).
    pub fn name(self) -> &'static str {
        match self {
            Self::Thread => "thread",
            Self::Timing => "timing",
            Self::Transport => "transport",
        }
    }

    /// Resolve a decorator name to its kind.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for DecoratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decorator value of any known shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decorator {
    Thread(ThreadDecorator),
    Timing(TimingDecorator),
    Transport(TransportDecorator),
}

impl Decorator {
    /// The shape of this decorator.
    pub fn kind(&self) -> DecoratorKind {
        match self {
            Self::Thread(_) => DecoratorKind::Thread,
            Self::Timing(_) => DecoratorKind::Timing,
            Self::Transport(_) => DecoratorKind::Transport,
        }
    }
}

/// A concrete decorator shape that can live in a [`Decorators`] bag.
pub trait DecoratorShape: Clone {
    /// The kind this shape is stored as.
    const KIND: DecoratorKind;

    /// Wrap the value into the tagged union.
    fn into_decorator(self) -> Decorator;

    /// Borrow the value back out if the union holds this shape.
    fn from_decorator(decorator: &Decorator) -> Option<&Self>;
}

impl DecoratorShape for ThreadDecorator {
    const KIND: DecoratorKind = DecoratorKind::Thread;

    fn into_decorator(self) -> Decorator {
        Decorator::Thread(self)
    }

    fn from_decorator(decorator: &Decorator) -> Option<&Self> {
        match decorator {
            Decorator::Thread(thread) => Some(thread),
            _ => None,
        }
    }
}

impl DecoratorShape for TimingDecorator {
    const KIND: DecoratorKind = DecoratorKind::Timing;

    fn into_decorator(self) -> Decorator {
        Decorator::Timing(self)
    }

    fn from_decorator(decorator: &Decorator) -> Option<&Self> {
        match decorator {
            Decorator::Timing(timing) => Some(timing),
            _ => None,
        }
    }
}

impl DecoratorShape for TransportDecorator {
    const KIND: DecoratorKind = DecoratorKind::Transport;

    fn into_decorator(self) -> Decorator {
        Decorator::Transport(self)
    }

    fn from_decorator(decorator: &Decorator) -> Option<&Self> {
        match decorator {
            Decorator::Transport(transport) => Some(transport),
            _ => None,
        }
    }
}

/// The decorator bag carried by every message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decorators {
    entries: BTreeMap<String, Decorator>,
}

impl Decorators {
    /// Attach a new decorator. Fails if `name` is already present.
    pub fn add<D: DecoratorShape>(&mut self, value: D, name: &str) -> AriadneResult<()> {
        check_name::<D>(name)?;
        if self.entries.contains_key(name) {
            return Err(AriadneError::DuplicateDecorator(name.to_string()));
        }
        self.entries.insert(name.to_string(), value.into_decorator());
        Ok(())
    }

    /// Retrieve a decorator and check its shape.
    pub fn get<D: DecoratorShape>(&self, name: &str) -> AriadneResult<&D> {
        let decorator = self
            .entries
            .get(name)
            .ok_or_else(|| AriadneError::DecoratorNotFound(name.to_string()))?;
        D::from_decorator(decorator).ok_or_else(|| AriadneError::DecoratorTypeMismatch {
            name: name.to_string(),
            expected: D::KIND.name(),
            found: decorator.kind().name(),
        })
    }

    /// Insert or replace a decorator.
    pub fn set<D: DecoratorShape>(&mut self, value: D, name: &str) -> AriadneResult<()> {
        check_name::<D>(name)?;
        self.entries.insert(name.to_string(), value.into_decorator());
        Ok(())
    }

    /// Like [`get`](Self::get), but absence or a shape mismatch yields `None`.
    pub fn find<D: DecoratorShape>(&self, name: &str) -> Option<&D> {
        self.get(name).ok()
    }

    /// Number of attached decorators.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no decorators are attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A name is accepted only if it is known and registered for `D`'s shape.
fn check_name<D: DecoratorShape>(name: &str) -> AriadneResult<()> {
    let kind =
        DecoratorKind::from_name(name).ok_or_else(|| AriadneError::UnknownDecorator(name.to_string()))?;
    if kind != D::KIND {
        return Err(AriadneError::DecoratorTypeMismatch {
            name: name.to_string(),
            expected: kind.name(),
            found: D::KIND.name(),
        });
    }
    Ok(())
}

impl Serialize for Decorators {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, decorator) in &self.entries {
            let key = format!("{DECORATOR_PREFIX}{name}");
            match decorator {
                Decorator::Thread(thread) => map.serialize_entry(&key, thread)?,
                Decorator::Timing(timing) => map.serialize_entry(&key, timing)?,
                Decorator::Transport(transport) => map.serialize_entry(&key, transport)?,
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Decorators {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DecoratorsVisitor)
    }
}

struct DecoratorsVisitor;

impl<'de> Visitor<'de> for DecoratorsVisitor {
    type Value = Decorators;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of `~`-prefixed decorators")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Decorators, A::Error> {
        let mut entries = BTreeMap::new();
        while let Some(key) = access.next_key::<String>()? {
            // Non-decorator keys belong to the enclosing message.
            let Some(name) = key.strip_prefix(DECORATOR_PREFIX) else {
                access.next_value::<IgnoredAny>()?;
                continue;
            };
            let kind = DecoratorKind::from_name(name)
                .ok_or_else(|| de::Error::custom(format!("unknown decorator '{key}'")))?;
            let decorator = match kind {
                DecoratorKind::Thread => Decorator::Thread(access.next_value()?),
                DecoratorKind::Timing => Decorator::Timing(access.next_value()?),
                DecoratorKind::Transport => Decorator::Transport(access.next_value()?),
            };
            if entries.insert(name.to_string(), decorator).is_some() {
                return Err(de::Error::custom(format!("duplicate decorator '{key}'")));
            }
        }
        Ok(Decorators { entries })
    }
}
