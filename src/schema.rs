use crate::catalog::{CatalogEntry, GroupDef};
use crate::error::NamelistError;
use fnv::FnvBuildHasher;
use indexmap::IndexMap;

pub(crate) type FnvIndexMap<K, V> = IndexMap<K, V, FnvBuildHasher>;

/// Maximum number of dimensions a parameter can be declared with
pub(crate) const MAX_DIMS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScalarType {
    Str { max_len: usize },
    Float,
    Integer,
    Boolean,
}

impl ScalarType {
    /// Decode a catalog type code: DP, I, L or C<n>
    pub(crate) fn from_code(param: &str, code: &str) -> Result<Self, NamelistError> {
        match code {
            "DP" => Ok(ScalarType::Float),
            "I" => Ok(ScalarType::Integer),
            "L" => Ok(ScalarType::Boolean),
            _ => {
                if let Some(len_str) = code.strip_prefix('C')
                    && let Ok(max_len) = len_str.parse::<usize>()
                {
                    Ok(ScalarType::Str { max_len })
                } else {
                    Err(NamelistError::UnknownScalarType {
                        param: param.to_string(),
                        code: code.to_string(),
                    })
                }
            }
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            ScalarType::Str { .. } => "string",
            ScalarType::Float => "float",
            ScalarType::Integer => "integer",
            ScalarType::Boolean => "boolean",
        }
    }
}

/// How the parameters of a group are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GroupCapability {
    /// one flat array per parameter
    Dense,
    /// one record per outer entity, inner values flat
    Indexed,
    /// one record per outer entity, 3-D parameters stored as rows of the middle dimension
    IndexedNested,
}

impl GroupCapability {
    pub(crate) fn is_indexed(self) -> bool {
        !matches!(self, GroupCapability::Dense)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ParameterSchema {
    pub(crate) name: String,
    pub(crate) dims: Vec<usize>,
    pub(crate) scalar_type: ScalarType,
    pub(crate) group: String,
    pub(crate) units: Option<&'static str>,
    pub(crate) description: Option<&'static str>,
}

impl ParameterSchema {
    /// total number of values the parameter can hold
    pub(crate) fn flat_max(&self) -> usize {
        self.dims.iter().product()
    }

    /// number of values held by a single entity of an indexed group
    pub(crate) fn entity_capacity(&self) -> usize {
        self.dims[..self.dims.len().saturating_sub(1)]
            .iter()
            .product()
    }

    /// digit width of the outermost declared cardinality
    pub(crate) fn outer_width(&self) -> usize {
        self.dims.last().map_or(1, |outer| outer.to_string().len())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct GroupSchema {
    pub(crate) name: String,
    pub(crate) capability: GroupCapability,
    pub(crate) members: Vec<String>,
}

#[derive(Debug)]
pub(crate) struct Registry {
    params: FnvIndexMap<String, ParameterSchema>,
    groups: FnvIndexMap<String, GroupSchema>,
}

impl Registry {
    /// Build the registry from the catalog compiled into the tool
    pub(crate) fn builtin() -> Result<Self, NamelistError> {
        Self::from_catalog(crate::catalog::GROUPS, crate::catalog::PARAMETERS)
    }

    pub(crate) fn from_catalog(
        group_defs: &[GroupDef],
        entries: &[CatalogEntry],
    ) -> Result<Self, NamelistError> {
        let mut groups = FnvIndexMap::default();
        for group_def in group_defs {
            let group = GroupSchema {
                name: group_def.name.to_string(),
                capability: group_def.capability,
                members: Vec::new(),
            };
            if groups.insert(group.name.clone(), group).is_some() {
                return Err(NamelistError::InvalidSchema(format!(
                    "group {} is defined more than once",
                    group_def.name
                )));
            }
        }

        let mut params = FnvIndexMap::default();
        for entry in entries {
            let param = Self::load_entry(entry, &groups)?;
            if params.contains_key(&param.name) {
                return Err(NamelistError::InvalidSchema(format!(
                    "parameter {} is defined more than once",
                    param.name
                )));
            }
            if let Some(group) = groups.get_mut(&param.group) {
                group.members.push(param.name.clone());
            }
            params.insert(param.name.clone(), param);
        }

        Ok(Self { params, groups })
    }

    fn load_entry(
        entry: &CatalogEntry,
        groups: &FnvIndexMap<String, GroupSchema>,
    ) -> Result<ParameterSchema, NamelistError> {
        if entry.dims.len() > MAX_DIMS {
            return Err(NamelistError::UnsupportedDimensionality {
                param: entry.name.to_string(),
                dims: entry.dims.len(),
            });
        }
        if entry.dims.contains(&0) {
            return Err(NamelistError::InvalidSchema(format!(
                "parameter {} has a zero-sized dimension",
                entry.name
            )));
        }
        let Some(group) = groups.get(entry.group) else {
            return Err(NamelistError::InvalidSchema(format!(
                "parameter {} belongs to the undefined group {}",
                entry.name, entry.group
            )));
        };
        if group.capability.is_indexed() && entry.dims.is_empty() {
            return Err(NamelistError::InvalidSchema(format!(
                "parameter {} of indexed group {} has no outer dimension",
                entry.name, entry.group
            )));
        }
        let scalar_type = ScalarType::from_code(entry.name, entry.dtype)?;

        Ok(ParameterSchema {
            name: entry.name.to_string(),
            dims: entry.dims.to_vec(),
            scalar_type,
            group: entry.group.to_string(),
            units: entry.units,
            description: entry.description,
        })
    }

    pub(crate) fn parameter(&self, name: &str) -> Option<&ParameterSchema> {
        self.params.get(name)
    }

    pub(crate) fn group(&self, name: &str) -> Option<&GroupSchema> {
        self.groups.get(name)
    }

    pub(crate) fn parameter_count(&self) -> usize {
        self.params.len()
    }

    pub(crate) fn group_count(&self) -> usize {
        self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn entry(name: &'static str, dims: &'static [usize], dtype: &'static str) -> CatalogEntry {
        CatalogEntry {
            name,
            dims,
            dtype,
            group: "TEST",
            units: None,
            description: None,
        }
    }

    const DENSE: &[GroupDef] = &[GroupDef {
        name: "TEST",
        capability: GroupCapability::Dense,
    }];

    const INDEXED: &[GroupDef] = &[GroupDef {
        name: "TEST",
        capability: GroupCapability::Indexed,
    }];

    #[test]
    fn scalar_type_codes() {
        assert_eq!(ScalarType::from_code("X", "DP").unwrap(), ScalarType::Float);
        assert_eq!(ScalarType::from_code("X", "I").unwrap(), ScalarType::Integer);
        assert_eq!(ScalarType::from_code("X", "L").unwrap(), ScalarType::Boolean);
        assert_eq!(
            ScalarType::from_code("X", "C35").unwrap(),
            ScalarType::Str { max_len: 35 }
        );
        for bad in ["SP", "C", "CX", ""] {
            let err = ScalarType::from_code("X", bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownScalarType);
        }
    }

    #[test]
    fn builtin_registry_loads() {
        let registry = Registry::builtin().unwrap();
        assert!(registry.group_count() >= 9);
        assert!(registry.parameter_count() > 100);

        let dma1 = registry.parameter("DMA1").unwrap();
        assert_eq!(dma1.dims, vec![99]);
        assert_eq!(dma1.scalar_type, ScalarType::Float);
        assert_eq!(dma1.group, "FINITE-BURNS");
        assert!(dma1.units.is_some());

        let fb = registry.group("FINITE-BURNS").unwrap();
        assert_eq!(fb.capability, GroupCapability::IndexedNested);
        assert!(fb.members.iter().any(|name| name == "TVDORA"));

        let tvdora = registry.parameter("TVDORA").unwrap();
        assert_eq!(tvdora.flat_max(), 3 * 2 * 99);
        assert_eq!(tvdora.entity_capacity(), 6);
        assert_eq!(tvdora.outer_width(), 2);

        let sevent = registry.parameter("SEVENT").unwrap();
        assert_eq!(sevent.outer_width(), 3);
        assert_eq!(sevent.entity_capacity(), 1);

        assert_eq!(
            registry.group("INTEG-CONTRL").unwrap().capability,
            GroupCapability::Dense
        );
        assert!(registry.parameter("NOT-A-PARAM").is_none());
    }

    #[test]
    fn dimensionless_parameter() {
        let registry = Registry::from_catalog(DENSE, &[entry("AU", &[], "DP")]).unwrap();
        let au = registry.parameter("AU").unwrap();
        assert_eq!(au.flat_max(), 1);
        assert_eq!(au.entity_capacity(), 1);
    }

    #[test]
    fn rejects_four_dimensions() {
        let err = Registry::from_catalog(DENSE, &[entry("SRPF", &[3, 36, 18, 2], "DP")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedDimensionality);
    }

    #[test]
    fn rejects_duplicates_and_bad_groups() {
        let err = Registry::from_catalog(DENSE, &[entry("A", &[2], "I"), entry("A", &[3], "I")])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSchema);

        let mut orphan = entry("B", &[2], "I");
        orphan.group = "NOWHERE";
        let err = Registry::from_catalog(DENSE, &[orphan]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSchema);

        let err = Registry::from_catalog(INDEXED, &[entry("C", &[], "I")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSchema);

        let err = Registry::from_catalog(DENSE, &[entry("D", &[0], "I")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSchema);

        let err = Registry::from_catalog(DENSE, &[entry("E", &[1], "SP")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownScalarType);
    }
}
