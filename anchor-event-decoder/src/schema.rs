//! Schemas, the discriminator registry, and dispatch.
//!
//! A [`Schema`] pairs a record name and discriminator with a decode function.
//! A [`SchemaRegistry`] indexes schemas by the raw discriminator bytes and
//! routes a payload to the schema whose discriminator prefixes it.

use std::{collections::HashMap, fmt};

use tracing::{debug, trace};

use crate::{
    cursor::Cursor,
    discriminator::{Discriminator, DISCRIMINATOR_SIZE},
    error::{DispatchError, RegistryError, Result},
};

/// Decode function of a schema. Receives a cursor over the payload that
/// follows the discriminator.
pub type DecodeFn<T> = fn(&mut Cursor<'_>) -> Result<T>;

/// Named decode rule for one record shape.
pub struct Schema<T> {
    pub name: &'static str,
    pub discriminator: Discriminator,
    pub decode: DecodeFn<T>,
}

impl<T> Schema<T> {
    pub const fn new(name: &'static str, discriminator: Discriminator, decode: DecodeFn<T>) -> Self {
        Self {
            name,
            discriminator,
            decode,
        }
    }

    /// Schema for an Anchor instruction, keyed by `global:<ix_name>`.
    pub fn instruction(name: &'static str, ix_name: &str, decode: DecodeFn<T>) -> Self {
        Self::new(name, Discriminator::instruction(ix_name), decode)
    }

    /// Schema for an Anchor event, keyed by `event:<event_name>`.
    pub fn event(name: &'static str, event_name: &str, decode: DecodeFn<T>) -> Self {
        Self::new(name, Discriminator::event(event_name), decode)
    }

    /// Decode a payload (discriminator already stripped).
    pub fn decode(&self, payload: &[u8]) -> Result<T> {
        let mut cursor = Cursor::new(payload);
        let value = (self.decode)(&mut cursor)?;
        if !cursor.is_empty() {
            trace!(
                schema = self.name,
                trailing = cursor.remaining(),
                "ignoring trailing bytes after record"
            );
        }
        Ok(value)
    }
}

impl<T> Clone for Schema<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Schema<T> {}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("discriminator", &self.discriminator)
            .finish()
    }
}

/// Result of decoding a payload with a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord<T> {
    /// Name of the schema that matched.
    pub name: &'static str,
    pub data: T,
}

/// Schemas indexed by discriminator.
///
/// Immutable once built, so it can be cached and shared across threads.
#[derive(Debug, Clone)]
pub struct SchemaRegistry<T> {
    schemas: HashMap<Discriminator, Schema<T>>,
    names: Vec<&'static str>,
}

impl<T> SchemaRegistry<T> {
    /// Build a registry. Two schemas with the same discriminator are rejected.
    pub fn new(schemas: impl IntoIterator<Item = Schema<T>>) -> Result<Self, RegistryError> {
        let mut map: HashMap<Discriminator, Schema<T>> = HashMap::new();
        let mut names = Vec::new();
        for schema in schemas {
            if let Some(existing) = map.get(&schema.discriminator) {
                return Err(RegistryError::DuplicateDiscriminator {
                    discriminator: schema.discriminator,
                    first: existing.name.to_string(),
                    second: schema.name.to_string(),
                });
            }
            names.push(schema.name);
            map.insert(schema.discriminator, schema);
        }
        Ok(Self {
            schemas: map,
            names,
        })
    }

    pub fn get(&self, discriminator: &Discriminator) -> Option<&Schema<T>> {
        self.schemas.get(discriminator)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Schema names in registration order.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    /// Match `data`'s leading discriminator and decode the rest.
    ///
    /// Returns `Ok(None)` when `data` is shorter than a discriminator or no
    /// schema matches. A matching schema whose decode fails yields
    /// [`DispatchError::Decode`].
    pub fn dispatch(&self, data: &[u8]) -> Result<Option<DecodedRecord<T>>, DispatchError> {
        let Some(discriminator) = Discriminator::extract(data) else {
            trace!(len = data.len(), "payload shorter than discriminator");
            return Ok(None);
        };
        let Some(schema) = self.schemas.get(&discriminator) else {
            trace!(%discriminator, "no schema matches discriminator");
            return Ok(None);
        };

        let data = schema
            .decode(&data[DISCRIMINATOR_SIZE..])
            .map_err(|source| DispatchError::Decode {
                schema: schema.name,
                source,
            })?;
        debug!(schema = schema.name, %discriminator, "decoded record");
        Ok(Some(DecodedRecord {
            name: schema.name,
            data,
        }))
    }

    /// Dispatch an event carried by an `emit_cpi!` instruction: the first 8
    /// bytes (the event instruction tag) are skipped, then the event
    /// discriminator is matched.
    pub fn dispatch_event(&self, ix_data: &[u8]) -> Result<Option<DecodedRecord<T>>, DispatchError> {
        match ix_data.get(DISCRIMINATOR_SIZE..) {
            Some(event_data) => self.dispatch(event_data),
            None => Ok(None),
        }
    }
}

/// Build a registry from `schemas` and dispatch `data` against it.
pub fn decode_structs<T>(
    schemas: &[Schema<T>],
    data: &[u8],
) -> Result<Option<DecodedRecord<T>>, DispatchError> {
    SchemaRegistry::new(schemas.iter().copied())?.dispatch(data)
}

/// Like [`decode_structs`], for instruction data carrying an `emit_cpi!` event.
pub fn decode_events<T>(
    schemas: &[Schema<T>],
    ix_data: &[u8],
) -> Result<Option<DecodedRecord<T>>, DispatchError> {
    SchemaRegistry::new(schemas.iter().copied())?.dispatch_event(ix_data)
}
