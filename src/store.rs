use crate::coerce::Value;
use crate::error::NamelistError;
use crate::flatten::unflatten;
use crate::schema::{FnvIndexMap, GroupCapability, GroupSchema, ParameterSchema, Registry};
use std::collections::BTreeMap;

/// A storage position; None until a value is written to it
pub(crate) type Slot = Option<Value>;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Storage {
    /// a dimensionless parameter, or one value per entity of an indexed group
    Scalar(Slot),
    Array(Vec<Slot>),
    /// rows of the middle dimension of a 3-D parameter inside an entity record
    Rows(Vec<Vec<Slot>>),
}

impl Storage {
    /// storage for a parameter of a dense group
    fn dense(param: &ParameterSchema) -> Self {
        if param.dims.is_empty() {
            Storage::Scalar(None)
        } else {
            Storage::Array(vec![None; param.flat_max()])
        }
    }

    /// storage for the part of a parameter that belongs to one entity of an indexed group
    fn entity(param: &ParameterSchema, capability: GroupCapability) -> Self {
        match param.dims[..] {
            [_] => Storage::Scalar(None),
            [inner, middle, _] if capability == GroupCapability::IndexedNested => {
                Storage::Rows(vec![vec![None; inner]; middle])
            }
            _ => Storage::Array(vec![None; param.entity_capacity()]),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        match self {
            Storage::Scalar(_) => 1,
            Storage::Array(slots) => slots.len(),
            Storage::Rows(rows) => rows.iter().map(Vec::len).sum(),
        }
    }

    /// the value at a flat position inside this storage
    pub(crate) fn slot(&self, index: usize) -> Option<&Value> {
        match self {
            Storage::Scalar(slot) if index == 0 => slot.as_ref(),
            Storage::Scalar(_) => None,
            Storage::Array(slots) => slots.get(index)?.as_ref(),
            Storage::Rows(rows) => {
                let row_len = rows.first().map_or(0, Vec::len);
                if row_len == 0 {
                    return None;
                }
                rows.get(index / row_len)?.get(index % row_len)?.as_ref()
            }
        }
    }

    /// number of slots that hold a value
    pub(crate) fn written(&self) -> usize {
        self.values().count()
    }

    /// all values that have been written, with their flat position
    pub(crate) fn values(&self) -> impl Iterator<Item = (usize, &Value)> {
        (0..self.capacity()).filter_map(move |index| Some((index, self.slot(index)?)))
    }

    /// Write a contiguous run of values starting at a flat position.
    /// Rows are filled left to right; a run that reaches the end of a row continues in the next one.
    fn write(&mut self, param: &str, start: usize, values: &[Value]) -> Result<(), NamelistError> {
        match self {
            Storage::Scalar(slot) => {
                if start > 0 || values.len() > 1 {
                    return Err(NamelistError::ScatterBounds {
                        param: param.to_string(),
                        row: start,
                    });
                }
                if let Some(value) = values.first() {
                    *slot = Some(value.clone());
                }
            }
            Storage::Array(slots) => {
                let Some(target) = slots.get_mut(start..start + values.len()) else {
                    return Err(NamelistError::ScatterBounds {
                        param: param.to_string(),
                        row: 0,
                    });
                };
                for (slot, value) in target.iter_mut().zip(values) {
                    *slot = Some(value.clone());
                }
            }
            Storage::Rows(rows) => {
                let row_len = rows.first().map_or(0, Vec::len);
                let mut row = start / row_len.max(1);
                let mut col = start % row_len.max(1);
                let mut remaining = values;
                while !remaining.is_empty() {
                    // bounds guard: a run must never leave the entity record
                    let Some(target) = rows.get_mut(row).filter(|_| row_len > 0) else {
                        return Err(NamelistError::ScatterBounds {
                            param: param.to_string(),
                            row,
                        });
                    };
                    let count = remaining.len().min(row_len - col);
                    for (slot, value) in target[col..col + count].iter_mut().zip(remaining) {
                        *slot = Some(value.clone());
                    }
                    remaining = &remaining[count..];
                    row += 1;
                    col = 0;
                }
            }
        }
        Ok(())
    }
}

/// The storage of every parameter of one group, in catalog order
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct Record {
    params: FnvIndexMap<String, Storage>,
}

impl Record {
    fn new(
        group: &GroupSchema,
        registry: &Registry,
        make_storage: impl Fn(&ParameterSchema) -> Storage,
    ) -> Self {
        let params = group
            .members
            .iter()
            .filter_map(|name| registry.parameter(name))
            .map(|param| (param.name.clone(), make_storage(param)))
            .collect();
        Self { params }
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Storage> {
        self.params.get(name)
    }

    /// number of parameters with storage in this record
    pub(crate) fn len(&self) -> usize {
        self.params.len()
    }

    /// number of parameters with at least one value
    pub(crate) fn assigned_count(&self) -> usize {
        self.params
            .values()
            .filter(|storage| storage.written() > 0)
            .count()
    }

    fn storage_mut(&mut self, name: &str) -> Result<&mut Storage, NamelistError> {
        self.params.get_mut(name).ok_or_else(|| {
            NamelistError::InvalidSchema(format!("parameter {name} has no storage in its group"))
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GroupContainer {
    Dense(Record),
    /// entity records keyed by the zero-padded 1-based outer index
    Indexed(BTreeMap<String, Record>),
}

impl GroupContainer {
    pub(crate) fn record(&self) -> Option<&Record> {
        match self {
            GroupContainer::Dense(record) => Some(record),
            GroupContainer::Indexed(_) => None,
        }
    }

    pub(crate) fn entity(&self, key: &str) -> Option<&Record> {
        match self {
            GroupContainer::Dense(_) => None,
            GroupContainer::Indexed(entities) => entities.get(key),
        }
    }

    pub(crate) fn entity_keys(&self) -> Vec<&str> {
        match self {
            GroupContainer::Dense(_) => Vec::new(),
            GroupContainer::Indexed(entities) => entities.keys().map(String::as_str).collect(),
        }
    }
}

/// The typed result of reading a namelist, keyed by group name
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct ParsedDocument {
    groups: FnvIndexMap<String, GroupContainer>,
}

impl ParsedDocument {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn group(&self, name: &str) -> Option<&GroupContainer> {
        self.groups.get(name)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Write a run of values for a parameter, starting at a flat offset.
    ///
    /// The run must fit into the parameter's total capacity. For indexed groups
    /// the run starts in the entity addressed by the offset and continues in the
    /// following entities, which are created as needed.
    pub(crate) fn scatter(
        &mut self,
        registry: &Registry,
        param: &ParameterSchema,
        offset: usize,
        values: &[Value],
    ) -> Result<(), NamelistError> {
        let Some(group) = registry.group(&param.group) else {
            return Err(NamelistError::InvalidSchema(format!(
                "parameter {} belongs to the undefined group {}",
                param.name, param.group
            )));
        };
        let container = self
            .groups
            .entry(group.name.clone())
            .or_insert_with(|| match group.capability {
                GroupCapability::Dense => {
                    GroupContainer::Dense(Record::new(group, registry, Storage::dense))
                }
                GroupCapability::Indexed | GroupCapability::IndexedNested => {
                    GroupContainer::Indexed(BTreeMap::new())
                }
            });

        match container {
            GroupContainer::Dense(record) => {
                record
                    .storage_mut(&param.name)?
                    .write(&param.name, offset, values)
            }
            GroupContainer::Indexed(entities) => {
                let capacity = param.entity_capacity();
                let width = param.outer_width();
                let mut entity = offset / capacity + 1;
                let mut inner = offset % capacity;
                let mut remaining = values;

                while !remaining.is_empty() {
                    let key = format!("{entity:0width$}");
                    let record = entities.entry(key).or_insert_with(|| {
                        Record::new(group, registry, |member| {
                            Storage::entity(member, group.capability)
                        })
                    });
                    let count = remaining.len().min(capacity - inner);
                    record.storage_mut(&param.name)?.write(
                        &param.name,
                        inner,
                        &remaining[..count],
                    )?;
                    remaining = &remaining[count..];
                    entity += 1;
                    inner = 0;
                }
                Ok(())
            }
        }
    }

    /// One line per group describing what was read
    pub(crate) fn summary(&self) -> Vec<String> {
        self.groups
            .iter()
            .map(|(name, container)| match container {
                GroupContainer::Dense(record) => {
                    format!(
                        "{name}: {} of {} parameters assigned",
                        record.assigned_count(),
                        record.len()
                    )
                }
                GroupContainer::Indexed(_) => {
                    let keys = container.entity_keys();
                    format!("{name}: {} entities ({})", keys.len(), keys.join(", "))
                }
            })
            .collect()
    }

    /// Every assigned value, grouped by parameter and written as `NAME(subscript) = value`
    pub(crate) fn listing(&self, registry: &Registry) -> Vec<String> {
        let mut lines = Vec::new();
        for (group_name, container) in &self.groups {
            let Some(group) = registry.group(group_name) else {
                continue;
            };
            lines.push(group_name.clone());
            for param in group.members.iter().filter_map(|name| registry.parameter(name)) {
                // (flat offset, value) of every assigned position of the parameter
                let assigned: Vec<(usize, &Value)> = if let Some(record) = container.record() {
                    record
                        .get(&param.name)
                        .into_iter()
                        .flat_map(Storage::values)
                        .collect()
                } else {
                    container
                        .entity_keys()
                        .into_iter()
                        .filter_map(|key| {
                            let entity = key.parse::<usize>().ok()?;
                            let base = (entity - 1) * param.entity_capacity();
                            Some((base, container.entity(key)?.get(&param.name)?))
                        })
                        .flat_map(|(base, storage)| {
                            storage.values().map(move |(index, value)| (base + index, value))
                        })
                        .collect()
                };
                if assigned.is_empty() {
                    continue;
                }

                let dims = param
                    .dims
                    .iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                let mut header = format!("  {} ({}", param.name, param.scalar_type.name());
                if !dims.is_empty() {
                    header.push_str(&format!(", {dims}"));
                }
                header.push(')');
                if let Some(units) = param.units {
                    header.push_str(&format!(" [{units}]"));
                }
                lines.push(header);
                if let Some(description) = param.description {
                    lines.push(format!("    {description}"));
                }

                for (offset, value) in assigned {
                    let subscript = unflatten(offset, &param.dims);
                    if subscript.is_empty() {
                        lines.push(format!("    {} = {value}", param.name));
                    } else {
                        let subscript = subscript
                            .iter()
                            .map(usize::to_string)
                            .collect::<Vec<_>>()
                            .join(",");
                        lines.push(format!("    {}({subscript}) = {value}", param.name));
                    }
                }
            }
        }
        lines
    }
}
