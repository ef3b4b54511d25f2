// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Generic gene.

A [`Gene`] is a key plus one value per attribute declared by its
[`GeneVariant`]. All lifecycle operations (initialization, mutation,
crossover, distance, ordering) are written once here and driven by the
variant's static attribute list.

```text
Gene::new(key) ─▶ init_attributes ─▶ mutate ... mutate ─▶ clone / crossover
  (values unset)    (from config)     (in place)           (child gene)
```
*/

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::attributes::{wrong_kind, AttributeRef, AttributeValue, ValueKind};
use crate::config::GeneConfig;
use crate::random::coin_flip;
use crate::types::{GeneError, GeneResult};

/// Node identifier
pub type NodeId = i64;

/// Shape of a gene key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyKind {
    Node,
    Connection,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Node => f.write_str("an integer node id"),
            KeyKind::Connection => f.write_str("a (source, target) node id pair"),
        }
    }
}

/// Key of any gene, as seen by code handling several variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneKey {
    Node(NodeId),
    Connection(NodeId, NodeId),
}

impl GeneKey {
    pub fn kind(&self) -> KeyKind {
        match self {
            GeneKey::Node(_) => KeyKind::Node,
            GeneKey::Connection(..) => KeyKind::Connection,
        }
    }

    /// Order two keys of the same kind
    ///
    /// # Errors
    ///
    /// Returns `GeneError::KeyOrdering` when the keys have different kinds
    pub fn try_cmp(&self, other: &GeneKey) -> GeneResult<Ordering> {
        self.partial_cmp(other)
            .ok_or(GeneError::KeyOrdering(*self, *other))
    }
}

impl PartialOrd for GeneKey {
    /// Keys of different kinds are unordered
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (GeneKey::Node(a), GeneKey::Node(b)) => Some(a.cmp(b)),
            (GeneKey::Connection(a0, a1), GeneKey::Connection(b0, b1)) => {
                Some((a0, a1).cmp(&(b0, b1)))
            }
            _ => None,
        }
    }
}

impl From<NodeId> for GeneKey {
    fn from(id: NodeId) -> Self {
        GeneKey::Node(id)
    }
}

impl From<(NodeId, NodeId)> for GeneKey {
    fn from((source, target): (NodeId, NodeId)) -> Self {
        GeneKey::Connection(source, target)
    }
}

impl fmt::Display for GeneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneKey::Node(id) => write!(f, "{}", id),
            GeneKey::Connection(source, target) => write!(f, "({}, {})", source, target),
        }
    }
}

/// A concrete kind of gene: its key shape, attribute list and distance
pub trait GeneVariant: Sized + 'static {
    type Key: Copy + Ord + Hash + fmt::Debug + Into<GeneKey>;

    /// Name used in errors and `Display`
    const NAME: &'static str;
    const KEY_KIND: KeyKind;

    /// Typed key from a dynamic key of the right shape
    ///
    /// # Errors
    ///
    /// Returns `GeneError::InvalidKey` when the shape does not match
    fn key_from(key: GeneKey) -> GeneResult<Self::Key>;

    /// Ordered, shared attribute descriptors
    fn attributes() -> &'static [AttributeRef];

    /// Unscaled distance between two genes of this variant
    fn raw_distance(a: &Gene<Self>, b: &Gene<Self>, config: &GeneConfig) -> GeneResult<f64>;

    fn invalid_key(found: GeneKey) -> GeneError {
        GeneError::InvalidKey {
            variant: Self::NAME,
            expected: Self::KEY_KIND,
            found,
        }
    }
}

pub struct Gene<V: GeneVariant> {
    key: V::Key,
    values: Vec<Option<AttributeValue>>,
    variant: PhantomData<V>,
}

impl<V: GeneVariant> Gene<V> {
    /// Construct a gene from a dynamic key; attribute values start unset
    ///
    /// # Errors
    ///
    /// Returns `GeneError::InvalidKey` if the key shape does not match `V`
    pub fn new(key: GeneKey) -> GeneResult<Self> {
        Ok(Self::with_key(V::key_from(key)?))
    }

    /// Construct a gene from an already typed key
    pub fn with_key(key: V::Key) -> Self {
        Self {
            key,
            values: vec![None; V::attributes().len()],
            variant: PhantomData,
        }
    }

    pub fn key(&self) -> V::Key {
        self.key
    }

    pub fn gene_key(&self) -> GeneKey {
        self.key.into()
    }

    pub fn attributes() -> &'static [AttributeRef] {
        V::attributes()
    }

    /// Every configuration parameter this variant's attributes read
    pub fn config_params() -> Vec<neat_config::ConfigParameter> {
        V::attributes()
            .iter()
            .flat_map(|attribute| attribute.config_params())
            .collect()
    }

    pub fn is_initialized(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    fn index_of(&self, name: &str) -> GeneResult<usize> {
        V::attributes()
            .iter()
            .position(|attribute| attribute.name() == name)
            .ok_or_else(|| GeneError::UnknownAttribute {
                variant: V::NAME,
                attribute: name.to_string(),
            })
    }

    /// Current value of attribute `name`, `None` if unknown or unset
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        let index = self.index_of(name).ok()?;
        self.values[index].as_ref()
    }

    /// Value of attribute `name`, which must be set
    pub fn value(&self, name: &str) -> GeneResult<&AttributeValue> {
        let index = self.index_of(name)?;
        self.values[index]
            .as_ref()
            .ok_or_else(|| GeneError::Uninitialized(name.to_string()))
    }

    /// Set attribute `name`, rejecting unknown attributes and values of the wrong kind
    pub fn set(&mut self, name: &str, value: AttributeValue) -> GeneResult<()> {
        let index = self.index_of(name)?;
        let attribute = V::attributes()[index];
        if value.kind() != attribute.value_kind() {
            return Err(wrong_kind(attribute, &value));
        }
        self.values[index] = Some(value);
        Ok(())
    }

    pub fn float(&self, name: &str) -> GeneResult<f64> {
        let value = self.value(name)?;
        value.as_float().ok_or_else(|| self.kind_error(name, ValueKind::Float, value))
    }

    pub fn boolean(&self, name: &str) -> GeneResult<bool> {
        let value = self.value(name)?;
        value.as_bool().ok_or_else(|| self.kind_error(name, ValueKind::Bool, value))
    }

    pub fn function(&self, name: &str) -> GeneResult<&str> {
        let value = self.value(name)?;
        value
            .as_function()
            .ok_or_else(|| self.kind_error(name, ValueKind::Function, value))
    }

    fn kind_error(&self, name: &str, expected: ValueKind, found: &AttributeValue) -> GeneError {
        GeneError::ValueKind {
            attribute: name.to_string(),
            expected,
            found: found.kind(),
        }
    }

    /// Set every attribute to a fresh value drawn from the configuration
    pub fn init_attributes(
        &mut self,
        config: &GeneConfig,
        rng: &mut dyn RngCore,
    ) -> GeneResult<()> {
        let values = V::attributes()
            .iter()
            .map(|attribute| attribute.init_value(config, rng).map(Some))
            .collect::<GeneResult<Vec<_>>>()?;
        self.values = values;
        Ok(())
    }

    /// Mutate every attribute independently, in place
    ///
    /// All new values are computed before any is stored, so an error leaves
    /// the gene unchanged.
    pub fn mutate(&mut self, config: &GeneConfig, rng: &mut dyn RngCore) -> GeneResult<()> {
        let mut mutated = Vec::with_capacity(self.values.len());
        for (attribute, value) in V::attributes().iter().zip(&self.values) {
            let value = value
                .as_ref()
                .ok_or_else(|| GeneError::Uninitialized(attribute.name().to_string()))?;
            mutated.push(Some(attribute.mutate_value(value, config, rng)?));
        }
        self.values = mutated;
        Ok(())
    }

    /// Child gene inheriting each attribute from either parent with equal
    /// probability, decided independently per attribute
    ///
    /// # Errors
    ///
    /// Returns `GeneError::KeyMismatch` if the parents have different keys
    pub fn crossover(&self, other: &Self, rng: &mut dyn RngCore) -> GeneResult<Self> {
        if self.key != other.key {
            return Err(GeneError::KeyMismatch(self.gene_key(), other.gene_key()));
        }

        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(mine, theirs)| if coin_flip(rng) { mine.clone() } else { theirs.clone() })
            .collect();

        Ok(Self {
            key: self.key,
            values,
            variant: PhantomData,
        })
    }

    /// Compatibility distance, scaled by the configured coefficient
    pub fn distance(&self, other: &Self, config: &GeneConfig) -> GeneResult<f64> {
        Ok(V::raw_distance(self, other, config)? * config.compatibility_weight_coefficient())
    }

    /// Order by key; total within a variant
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }

    /// Order by key against a gene of any variant
    ///
    /// # Errors
    ///
    /// Returns `GeneError::KeyOrdering` when the key kinds differ
    pub fn try_cmp<W: GeneVariant>(&self, other: &Gene<W>) -> GeneResult<Ordering> {
        self.gene_key().try_cmp(&other.gene_key())
    }

    /// Serializable snapshot of this gene
    pub fn to_record(&self) -> GeneRecord {
        let attributes = V::attributes()
            .iter()
            .zip(&self.values)
            .filter_map(|(attribute, value)| {
                value
                    .as_ref()
                    .map(|v| (attribute.name().to_string(), v.clone()))
            })
            .collect();
        GeneRecord {
            key: self.gene_key(),
            attributes,
        }
    }

    /// Rebuild a gene from a record
    ///
    /// # Errors
    ///
    /// Returns `GeneError::InvalidKey` for a key of the wrong shape and
    /// `GeneError::InvalidRecord` unless the record holds exactly this
    /// variant's attributes with values of the right kinds
    pub fn from_record(record: &GeneRecord) -> GeneResult<Self> {
        let mut gene = Self::new(record.key)?;

        for (name, value) in &record.attributes {
            gene.set(name, value.clone()).map_err(|e| {
                GeneError::InvalidRecord(format!("{} {}: {}", V::NAME, record.key, e))
            })?;
        }

        let missing: Vec<&str> = V::attributes()
            .iter()
            .zip(&gene.values)
            .filter(|(_, value)| value.is_none())
            .map(|(attribute, _)| attribute.name())
            .collect();
        if !missing.is_empty() {
            return Err(GeneError::InvalidRecord(format!(
                "{} {}: missing attributes {}",
                V::NAME,
                record.key,
                missing.join(", ")
            )));
        }

        Ok(gene)
    }
}

impl<V: GeneVariant> Clone for Gene<V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            values: self.values.clone(),
            variant: PhantomData,
        }
    }
}

impl<V: GeneVariant> PartialEq for Gene<V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.values == other.values
    }
}

impl<V: GeneVariant> fmt::Debug for Gene<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(V::NAME);
        s.field("key", &self.key);
        for (attribute, value) in V::attributes().iter().zip(&self.values) {
            s.field(attribute.name(), value);
        }
        s.finish()
    }
}

impl<V: GeneVariant> fmt::Display for Gene<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(key={}", V::NAME, self.gene_key())?;
        for (attribute, value) in V::attributes().iter().zip(&self.values) {
            match value {
                Some(value) => write!(f, ", {}={}", attribute.name(), value)?,
                None => write!(f, ", {}=None", attribute.name())?,
            }
        }
        write!(f, ")")
    }
}

/// Serializable form of a gene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneRecord {
    pub key: GeneKey,
    pub attributes: BTreeMap<String, AttributeValue>,
}
