use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Kind prefix of a node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdPrefix {
    Func,
    Struct,
    Interface,
    Method,
    Const,
    Var,
}

impl IdPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            IdPrefix::Func => "func_",
            IdPrefix::Struct => "struct_",
            IdPrefix::Interface => "interface_",
            IdPrefix::Method => "method_",
            IdPrefix::Const => "const_",
            IdPrefix::Var => "var_",
        }
    }
}

/// Identifier of a graph node, e.g. `struct_3`
///
/// The sequence number comes from one counter shared by every prefix, so it is
/// unique on its own and orders nodes by allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    prefix: IdPrefix,
    seq: u64,
}

impl NodeId {
    pub(crate) const fn new(prefix: IdPrefix, seq: u64) -> Self {
        Self { prefix, seq }
    }

    pub const fn prefix(self) -> IdPrefix {
        self.prefix
    }

    pub const fn seq(self) -> u64 {
        self.seq
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.seq
            .cmp(&other.seq)
            .then_with(|| self.prefix.cmp(&other.prefix))
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix.as_str(), self.seq)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Kind of declared entity a node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Function,
    Struct,
    Interface,
    InterfaceMethod,
    Constant,
    Variable,
}

/// Type of relationship between nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// A calls B
    Calls,

    /// Struct A embeds type B
    Embeds,

    /// Struct A has a named field of type B
    HasFieldOfType,

    /// Struct A owns method B
    HasMethod,

    /// Interface A declares method signature B
    Declares,

    /// A builds a composite literal of struct B
    Instantiates,

    /// A refers to type B
    Uses,

    /// Constant or variable A is declared with type B
    HasType,
}

impl Relation {
    /// Derivable from declaration shape alone
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Relation::Embeds | Relation::HasFieldOfType | Relation::Declares | Relation::HasType
        )
    }
}

/// Node in the code graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: NodeId,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub package: String,

    /// Base name of the declaring file
    #[serde(skip_serializing_if = "String::is_empty")]
    pub file: String,
}

/// Directed edge in the code graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub relation: Relation,
}

/// Nodes sorted by identifier plus edges in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Function, method or interface method signature record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInfo {
    pub name: String,
    pub parameters: Vec<ParameterInfo>,
    pub return_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub id: NodeId,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub package: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub file_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructInfo {
    pub name: String,
    /// Bound methods
    pub functions: Vec<FunctionInfo>,
    pub properties: Vec<PropertyInfo>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub id: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceInfo {
    pub name: String,
    pub functions: Vec<FunctionInfo>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub id: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub value: String,
    pub id: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    pub id: NodeId,
}

/// Everything extracted from one source unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleInfo {
    pub structs: Vec<StructInfo>,
    pub functions: Vec<FunctionInfo>,
    pub interfaces: Vec<InterfaceInfo>,
    pub dependencies: Vec<String>,
    pub constants: Vec<ConstantInfo>,
    pub variables: Vec<VariableInfo>,
}

/// Modules keyed by path relative to the project root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    pub modules: BTreeMap<String, ModuleInfo>,
}

/// The complete output document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStructure {
    pub project: BTreeMap<String, PackageInfo>,
    pub code_graph: CodeGraph,
}
