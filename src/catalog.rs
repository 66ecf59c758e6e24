// Static parameter catalog of the simulation input groups.
// Dims are listed innermost first; the last dimension is the outermost one,
// which is the entity (e.g. burn) number for indexed groups.
//
// Entries that the reader cannot represent are not listed:
//   SOL-PRESSURE: SRPF, SRPFA, SRPFB, SRTF, SRTFA, SRTFB (4 dimensions), KMNC (SP)
//   ATMOSPHERE: SHS (SP)
//   SPACECRAFT: UPRC (string without length)

use crate::schema::GroupCapability;

#[derive(Debug, Clone, Copy)]
pub(crate) struct GroupDef {
    pub(crate) name: &'static str,
    pub(crate) capability: GroupCapability,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct CatalogEntry {
    pub(crate) name: &'static str,
    pub(crate) dims: &'static [usize],
    pub(crate) dtype: &'static str,
    pub(crate) group: &'static str,
    pub(crate) units: Option<&'static str>,
    pub(crate) description: Option<&'static str>,
}

macro_rules! param {
    ($name:literal, $dtype:literal, [$($dim:literal),*], $group:literal) => {
        CatalogEntry {
            name: $name,
            dims: &[$($dim),*],
            dtype: $dtype,
            group: $group,
            units: None,
            description: None,
        }
    };
    ($name:literal, $dtype:literal, [$($dim:literal),*], $group:literal, $units:literal, $desc:literal) => {
        CatalogEntry {
            name: $name,
            dims: &[$($dim),*],
            dtype: $dtype,
            group: $group,
            units: Some($units),
            description: Some($desc),
        }
    };
}

pub(crate) const GROUPS: &[GroupDef] = &[
    GroupDef {
        name: "FINITE-BURNS",
        capability: GroupCapability::IndexedNested,
    },
    GroupDef {
        name: "INST-BURNS",
        capability: GroupCapability::Indexed,
    },
    GroupDef {
        name: "INTEG-CONTRL",
        capability: GroupCapability::Dense,
    },
    GroupDef {
        name: "SMALL-FORCES",
        capability: GroupCapability::Dense,
    },
    GroupDef {
        name: "SPACECRAFT",
        capability: GroupCapability::Dense,
    },
    GroupDef {
        name: "ATT-CONTROL",
        capability: GroupCapability::Dense,
    },
    GroupDef {
        name: "ASTRO-CONS",
        capability: GroupCapability::Dense,
    },
    GroupDef {
        name: "SOL-PRESSURE",
        capability: GroupCapability::Dense,
    },
    GroupDef {
        name: "ATMOSPHERE",
        capability: GroupCapability::Dense,
    },
];

pub(crate) const PARAMETERS: &[CatalogEntry] = &[
    // finite burns, one record per burn
    param!("DMA1", "DP", [99], "FINITE-BURNS",
        "seconds past the reference epoch",
        "Epoch of the start of finite burn i. The alternate character input is MA1T."),
    param!("DMA1TP", "C10", [99], "FINITE-BURNS"),
    param!("MA1T", "C35", [99], "FINITE-BURNS",
        "'DD-MMM-YYYY hh:mm:ss.ffffffff TYP'",
        "Epoch of the start of finite burn i. The alternate input in seconds is DMA1."),
    param!("MA1A", "DP", [10, 99], "FINITE-BURNS",
        "[deg, deg/sec, deg/sec^2, deg/sec^3, deg/sec^4, deg, deg/sec, deg/sec^2, deg/sec^3, deg/sec^4]",
        "Fourth degree polynomial coefficients of right ascension (j=1-5) and declination (j=6-10) of the unit thrust vector of burn i in the COORS system."),
    param!("MA1K", "DP", [99], "FINITE-BURNS",
        "depends on force units of MA1F",
        "Conversion factor from the user force / mass system of burn i to km/sec^2."),
    param!("MA1F", "DP", [5, 99], "FINITE-BURNS",
        "[force, force/sec, force/sec^2, force/sec^3, force/sec^4]",
        "Fourth degree polynomial coefficients of the thrust of burn i as a function of seconds past the start of the burn."),
    param!("MA1M", "DP", [4, 99], "FINITE-BURNS",
        "[kg/sec, (kg/sec)/sec, (kg/sec)/sec^2, (kg/sec)/sec^3]",
        "Third degree polynomial coefficients of the mass flow rate of burn i."),
    param!("MA1D", "DP", [99], "FINITE-BURNS",
        "seconds",
        "Duration of burn i, used when BURN(i) is 1."),
    param!("DELV", "DP", [99], "FINITE-BURNS"),
    param!("C3", "DP", [99], "FINITE-BURNS"),
    param!("BURN", "I", [99], "FINITE-BURNS",
        "n/a",
        "Termination flag of burn i: 1 = after MA1D(i), 2 = after DELV(i) velocity change, 3 = upon reaching C3(i) with respect to body BRD(i)."),
    param!("ACELC", "DP", [3, 99], "FINITE-BURNS"),
    param!("COORS", "C12", [5, 99], "FINITE-BURNS",
        "n/a",
        "Reference center (j=1), x-axis direction (j=2) and x-y plane description (j=3-5) used to compute the thrust direction of burn i."),
    param!("LPLANE", "C6", [99], "FINITE-BURNS",
        "n/a",
        "Reference plane for motor burn pitch and yaw angles."),
    param!("LDYN", "I", [99], "FINITE-BURNS",
        "n/a",
        "Reference plane flag: 0 means static reference plane, otherwise dynamic."),
    param!("ITPEQ", "C35", [99], "FINITE-BURNS",
        "n/a",
        "Epoch of the coordinate system of the thrust direction of burn i: DATE, 1950, 2000 or 'DD-MMM-YYYY hh:mm:ss.ffffffff TYP'."),
    param!("BRD", "I", [99], "FINITE-BURNS"),
    param!("CMPTF", "L", [99], "FINITE-BURNS"),
    param!("TVDORT", "I", [3, 2, 99], "FINITE-BURNS"),
    param!("TVDORA", "DP", [3, 2, 99], "FINITE-BURNS"),
    param!("TVTRNE", "DP", [99], "FINITE-BURNS"),
    param!("TVDGDR", "DP", [3, 99], "FINITE-BURNS"),
    param!("TVEPS", "DP", [3, 99], "FINITE-BURNS"),
    param!("TVTYPE", "C1", [2, 99], "FINITE-BURNS"),
    param!("ROLLAX", "I", [99], "FINITE-BURNS"),
    param!("SEBURN", "I", [1], "FINITE-BURNS"),
    param!("SEVENT", "C30", [100], "FINITE-BURNS"),
    param!("SEVTIM", "DP", [2, 100], "FINITE-BURNS"),
    param!("CSEVTM", "C35", [2, 100], "FINITE-BURNS"),
    // impulsive burns, one record per burn
    param!("BRNCRD", "I", [99], "INST-BURNS"),
    param!("DB1T", "DP", [99], "INST-BURNS"),
    param!("DB1TYP", "C10", [99], "INST-BURNS"),
    param!("MB1V", "DP", [3, 99], "INST-BURNS"),
    param!("MB1D", "DP", [99], "INST-BURNS"),
    param!("MB1P", "DP", [99], "INST-BURNS"),
    param!("ITVTYP", "C2", [99], "INST-BURNS"),
    param!("ITVDRT", "I", [6, 99], "INST-BURNS"),
    param!("ITVDRA", "DP", [6, 99], "INST-BURNS"),
    param!("ITVTRE", "DP", [99], "INST-BURNS"),
    param!("ITVDGD", "DP", [3, 99], "INST-BURNS"),
    param!("ITVEPS", "DP", [3, 99], "INST-BURNS"),
    param!("IROLLX", "I", [99], "INST-BURNS"),
    param!("DELVB1", "DP", [99], "INST-BURNS"),
    // integration control and initial conditions
    param!("DTIM", "DP", [], "INTEG-CONTRL"),
    param!("CENT", "I", [], "INTEG-CONTRL"),
    param!("IC", "DP", [6], "INTEG-CONTRL"),
    param!("ORBBND", "C6", [], "INTEG-CONTRL"),
    param!("IORBIT", "I", [], "INTEG-CONTRL"),
    param!("DEND", "DP", [], "INTEG-CONTRL"),
    param!("DRBD", "I", [], "INTEG-CONTRL"),
    param!("DRVL", "DP", [], "INTEG-CONTRL"),
    param!("TMPC", "DP", [], "INTEG-CONTRL"),
    param!("RBOD", "I", [], "INTEG-CONTRL"),
    param!("RVAL", "DP", [], "INTEG-CONTRL"),
    param!("IGTF", "I", [11], "INTEG-CONTRL"),
    param!("EPS", "DP", [], "INTEG-CONTRL"),
    param!("EPSV", "DP", [], "INTEG-CONTRL"),
    param!("HMAX", "DP", [], "INTEG-CONTRL"),
    param!("HMIN", "DP", [], "INTEG-CONTRL"),
    param!("LANDH", "DP", [], "INTEG-CONTRL"),
    param!("RSPH", "DP", [12], "INTEG-CONTRL"),
    param!("SATSPH", "DP", [60], "INTEG-CONTRL"),
    param!("XBSPH", "DP", [20], "INTEG-CONTRL"),
    param!("SRCHTM", "DP", [], "INTEG-CONTRL"),
    param!("RUNOUT", "I", [], "INTEG-CONTRL"),
    param!("MAKEPV", "L", [], "INTEG-CONTRL"),
    param!("BASE0", "L", [], "INTEG-CONTRL"),
    param!("RESTRT", "L", [4], "INTEG-CONTRL"),
    param!("DELQT", "DP", [], "INTEG-CONTRL"),
    param!("NBQT", "I", [], "INTEG-CONTRL"),
    param!("POLROT", "L", [], "INTEG-CONTRL"),
    param!("CINDIR", "L", [], "INTEG-CONTRL"),
    param!("PVBUG", "I", [4], "INTEG-CONTRL"),
    param!("THSHLD", "DP", [], "INTEG-CONTRL"),
    // small forces
    param!("SMFTIM", "DP", [1000], "SMALL-FORCES"),
    param!("SMFDR", "DP", [3, 1000], "SMALL-FORCES"),
    param!("SMFDV", "DP", [3, 1000], "SMALL-FORCES"),
    param!("SMFMAS", "DP", [1000], "SMALL-FORCES"),
    param!("SMFBAS", "DP", [1000], "SMALL-FORCES"),
    param!("SMFCRD", "I", [], "SMALL-FORCES"),
    param!("SMFTYP", "I", [1000], "SMALL-FORCES"),
    // spacecraft
    param!("SCID", "I", [], "SPACECRAFT"),
    param!("SCNAME", "C8", [], "SPACECRAFT"),
    param!("MASS", "DP", [], "SPACECRAFT"),
    param!("ACANO", "DP", [3, 40], "SPACECRAFT"),
    param!("DTCANO", "DP", [40], "SPACECRAFT"),
    param!("TTYPE", "C12", [2], "SPACECRAFT"),
    param!("DTUPRS", "DP", [200], "SPACECRAFT"),
    param!("UPRS", "C12", [200], "SPACECRAFT"),
    param!("DUPRS", "DP", [3, 200], "SPACECRAFT"),
    param!("REFBS", "C12", [2, 200], "SPACECRAFT"),
    param!("ANGTYP", "C1", [200], "SPACECRAFT"),
    param!("ANGLT", "I", [3, 200], "SPACECRAFT"),
    param!("ANGLS", "DP", [3, 200], "SPACECRAFT"),
    param!("STABLE", "I", [2], "SPACECRAFT"),
    param!("TABVAL", "DP", [2, 100], "SPACECRAFT"),
    param!("COMP", "C12", [10], "SPACECRAFT"),
    param!("CSIZE", "DP", [2, 10], "SPACECRAFT"),
    param!("DUPRC", "DP", [3, 200, 10], "SPACECRAFT"),
    param!("CANGLE", "DP", [200, 10], "SPACECRAFT"),
    param!("CMPTIM", "DP", [20], "SPACECRAFT"),
    param!("USECMP", "I", [100, 2], "SPACECRAFT"),
    param!("USETAB", "I", [20], "SPACECRAFT"),
    param!("MASDEC", "DP", [20], "SPACECRAFT"),
    param!("TOFF", "DP", [], "SPACECRAFT"),
    param!("OFFSET", "DP", [3], "SPACECRAFT"),
    param!("SPNDIR", "DP", [3], "SPACECRAFT"),
    param!("SPNRAT", "DP", [], "SPACECRAFT"),
    param!("TVDILE", "DP", [25], "SPACECRAFT"),
    // attitude control
    param!("DSAT", "DP", [2, 999], "ATT-CONTROL"),
    param!("SAAP", "DP", [9, 999], "ATT-CONTROL"),
    param!("SCALEQ", "DP", [], "ATT-CONTROL"),
    param!("STREXP", "DP", [100], "ATT-CONTROL"),
    param!("STREXT", "C10", [100], "ATT-CONTROL"),
    param!("STPEXP", "DP", [100], "ATT-CONTROL"),
    param!("STPEXT", "C10", [100], "ATT-CONTROL"),
    param!("AR", "DP", [100], "ATT-CONTROL"),
    param!("AX", "DP", [100], "ATT-CONTROL"),
    param!("AY", "DP", [100], "ATT-CONTROL"),
    param!("BB", "DP", [100], "ATT-CONTROL"),
    param!("MCAXIS", "I", [], "ATT-CONTROL"),
    param!("TMC", "DP", [200], "ATT-CONTROL"),
    param!("MCACC", "DP", [3, 200], "ATT-CONTROL"),
    // astrodynamic constants
    param!("GM", "DP", [12], "ASTRO-CONS"),
    param!("AU", "DP", [], "ASTRO-CONS"),
    param!("C", "DP", [], "ASTRO-CONS"),
    param!("PRNAXS", "DP", [3, 11], "ASTRO-CONS"),
    param!("RADI", "DP", [12], "ASTRO-CONS"),
    param!("OCRADI", "DP", [11], "ASTRO-CONS"),
    param!("FLAT", "DP", [11], "ASTRO-CONS"),
    param!("SMA", "DP", [11], "ASTRO-CONS"),
    param!("BETREL", "DP", [], "ASTRO-CONS"),
    param!("GAMREL", "DP", [], "ASTRO-CONS"),
    param!("LREL", "DP", [], "ASTRO-CONS"),
    param!("PLANGM", "DP", [6], "ASTRO-CONS"),
    param!("SATGM", "DP", [70], "ASTRO-CONS"),
    param!("SATPRN", "DP", [3, 70], "ASTRO-CONS"),
    param!("SATR", "DP", [70], "ASTRO-CONS"),
    param!("SATSMA", "DP", [70], "ASTRO-CONS"),
    param!("XBGM", "DP", [20], "ASTRO-CONS"),
    param!("XBPRN", "DP", [3, 20], "ASTRO-CONS"),
    param!("XBRAD", "DP", [20], "ASTRO-CONS"),
    param!("XBSMA", "DP", [20], "ASTRO-CONS"),
    // solar pressure
    param!("SRPFLG", "L", [], "SOL-PRESSURE"),
    param!("SHDWFL", "I", [], "SOL-PRESSURE"),
    param!("SC", "DP", [], "SOL-PRESSURE"),
    param!("SRPTYP", "C10", [], "SOL-PRESSURE"),
    param!("SRTTYP", "C10", [], "SOL-PRESSURE"),
    param!("SOLCOF", "DP", [], "SOL-PRESSURE"),
    param!("SOLTRQ", "DP", [], "SOL-PRESSURE"),
    param!("TRQTIM", "DP", [100], "SOL-PRESSURE"),
    param!("TRQMOD", "L", [100], "SOL-PRESSURE"),
    param!("REFB", "C12", [], "SOL-PRESSURE"),
    param!("ANGL", "DP", [], "SOL-PRESSURE"),
    param!("SOLSCL", "DP", [10], "SOL-PRESSURE"),
    param!("SCOFC", "DP", [4, 10], "SOL-PRESSURE"),
    param!("INDEG", "I", [], "SOL-PRESSURE"),
    param!("TDFC", "DP", [100, 10], "SOL-PRESSURE"),
    param!("SRPRA", "DP", [36], "SOL-PRESSURE"),
    param!("SRPCL", "DP", [19], "SOL-PRESSURE"),
    param!("SRPHRM", "I", [2], "SOL-PRESSURE"),
    param!("SRTRA", "DP", [36], "SOL-PRESSURE"),
    param!("SRTCL", "DP", [19], "SOL-PRESSURE"),
    param!("SRTHRM", "I", [2], "SOL-PRESSURE"),
    // atmospheric drag
    param!("IBYATM", "I", [], "ATMOSPHERE"),
    param!("IMDTIM", "DP", [10], "ATMOSPHERE"),
    param!("IMDATM", "I", [10], "ATMOSPHERE"),
    param!("SCLTIM", "DP", [25], "ATMOSPHERE"),
    param!("SCLTYP", "I", [25], "ATMOSPHERE"),
    param!("DENSCL", "DP", [2, 25], "ATMOSPHERE"),
    param!("SCLCOF", "DP", [50], "ATMOSPHERE"),
    param!("SCLAMP", "DP", [100], "ATMOSPHERE"),
    param!("SCLPHS", "DP", [100], "ATMOSPHERE"),
    param!("COFTYP", "I", [], "ATMOSPHERE"),
    param!("DRGSCL", "DP", [10], "ATMOSPHERE"),
    param!("DRGTIM", "DP", [100], "ATMOSPHERE"),
    param!("SCD", "DP", [100], "ATMOSPHERE"),
    param!("ATMCOF", "DP", [3, 10, 100], "ATMOSPHERE"),
    param!("ATMCLD", "DP", [100], "ATMOSPHERE"),
    param!("ODYA", "DP", [], "ATMOSPHERE"),
    param!("ODYTAB", "DP", [300], "ATMOSPHERE"),
];
