//! PHP class and function skeletons.
//!
//! `PhpClass` and `PhpFunction` collect what a scaffold operation wants in a
//! generated file; `render` hands them to the `Stamper`. Imports are sorted
//! and de-duplicated, functions are indented into the class body and the
//! result is tidied so optional sections leave no blank-line runs behind.

use serde::Serialize;

use crate::core::error::Result;
use crate::core::templating::{
    indent_each_line, tidy, Stamper, CLASS_TEMPLATE, CONTROLLER_TEMPLATE, FUNCTION_TEMPLATE,
};

/// Returns true for a PHP identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Splits a class path written with `/` or `\` into its segments.
/// Returns `None` unless every segment is an identifier.
pub fn class_segments(path: &str) -> Option<Vec<String>> {
    let normalized = path.replace('/', "\\");
    let trimmed = normalized.trim().trim_matches('\\');
    if trimmed.is_empty() {
        return None;
    }
    let segments: Vec<String> = trimmed.split('\\').map(str::to_string).collect();
    segments
        .iter()
        .all(|segment| is_identifier(segment))
        .then_some(segments)
}

/// A fully qualified class name split into namespace and short name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassName {
    pub namespace: String,
    pub short: String,
}

impl ClassName {
    /// Parses `Vendor\Module\Model\Post` (or with `/` separators, or a leading `\`).
    pub fn parse(value: &str) -> Option<ClassName> {
        let mut segments = class_segments(value)?;
        let short = segments.pop()?;
        Some(ClassName {
            namespace: segments.join("\\"),
            short,
        })
    }

    pub fn fqcn(&self) -> String {
        if self.namespace.is_empty() {
            self.short.clone()
        } else {
            format!("{}\\{}", self.namespace, self.short)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PhpFunction {
    doc: Vec<String>,
    modifier: String,
    name: String,
    arguments: Vec<String>,
    body: Vec<String>,
}

impl PhpFunction {
    pub fn new(modifier: impl Into<String>, name: impl Into<String>) -> Self {
        PhpFunction {
            modifier: modifier.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn public(name: impl Into<String>) -> Self {
        PhpFunction::new("public", name)
    }

    pub fn doc(mut self, line: impl Into<String>) -> Self {
        self.doc.push(line.into());
        self
    }

    pub fn arg(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn args<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    pub fn render(&self, stamper: &Stamper) -> Result<String> {
        Ok(stamper.render(FUNCTION_TEMPLATE, self)?.trim_end().to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PhpClass {
    namespace: String,
    imports: Vec<String>,
    name: String,
    parent: Option<String>,
    interfaces: Vec<String>,
    properties: Vec<String>,
    #[serde(skip)]
    functions: Vec<PhpFunction>,
}

#[derive(Serialize)]
struct ClassView<'a> {
    #[serde(flatten)]
    class: &'a PhpClass,
    body: String,
}

impl PhpClass {
    pub fn new(class_name: &ClassName) -> Self {
        PhpClass {
            namespace: class_name.namespace.clone(),
            imports: Vec::new(),
            name: class_name.short.clone(),
            parent: None,
            interfaces: Vec::new(),
            properties: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn import(mut self, class: impl Into<String>) -> Self {
        self.imports.push(class.into());
        self
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Adds a property declaration such as `protected $_cacheTag = 'blog_post';`.
    pub fn property(mut self, declaration: impl Into<String>) -> Self {
        self.properties.push(declaration.into());
        self
    }

    pub fn function(mut self, function: PhpFunction) -> Self {
        self.functions.push(function);
        self
    }

    pub fn render(&self, stamper: &Stamper) -> Result<String> {
        let rendered = self
            .functions
            .iter()
            .map(|function| function.render(stamper).map(|code| indent_each_line(&code)))
            .collect::<Result<Vec<_>>>()?;
        let mut class = self.clone();
        class.imports.sort();
        class.imports.dedup();
        let view = ClassView {
            class: &class,
            body: rendered.join("\n\n"),
        };
        Ok(tidy(&stamper.render(CLASS_TEMPLATE, &view)?))
    }
}

/// An action controller. The `execute` body is fixed by the template.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerClass {
    pub namespace: String,
    pub imports: Vec<String>,
    pub name: String,
    pub parent: String,
    pub interfaces: Vec<String>,
}

impl ControllerClass {
    pub fn render(&self, stamper: &Stamper) -> Result<String> {
        let mut controller = self.clone();
        controller.imports.sort();
        controller.imports.dedup();
        Ok(tidy(&stamper.render(CONTROLLER_TEMPLATE, &controller)?))
    }
}
