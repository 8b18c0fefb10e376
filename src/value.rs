use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::environment::Environment;
use crate::stmt::FunctionDecl;

/// A runtime Lox value.  Cloning is cheap: heap-backed variants are shared
/// through `Rc` handles.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    NativeFunction {
        name: String,
        arity: usize,
        func: fn(&[Value]) -> Result<Value, String>,
    },
    Function(Rc<LoxFunction>),
    Class(Rc<LoxClass>),
    Instance(Rc<RefCell<LoxInstance>>),
}

/// A user function: its declaration, the environment captured at its
/// definition site, and whether it is a class initializer.
#[derive(Clone)]
pub struct LoxFunction {
    pub declaration: Rc<FunctionDecl>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl LoxFunction {
    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// Produce a copy of this method whose closure has `this` bound to the
    /// given instance, sitting between the defining closure and the call scope.
    pub fn bind(&self, instance: Rc<RefCell<LoxInstance>>) -> Rc<LoxFunction> {
        let mut environment: Environment = Environment::with_enclosing(Rc::clone(&self.closure));

        environment.define("this", Value::Instance(instance));

        Rc::new(LoxFunction {
            declaration: Rc::clone(&self.declaration),
            closure: Rc::new(RefCell::new(environment)),
            is_initializer: self.is_initializer,
        })
    }
}

// The closure chain can reach back to this function; keep Debug shallow so a
// cycle never recurses.
impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

#[derive(Clone)]
pub struct LoxClass {
    pub name: String,
    methods: HashMap<String, Rc<LoxFunction>>,
}

impl LoxClass {
    pub fn new(name: String, methods: HashMap<String, Rc<LoxFunction>>) -> Self {
        LoxClass { name, methods }
    }

    pub fn find_method(&self, name: &str) -> Option<Rc<LoxFunction>> {
        self.methods.get(name).cloned()
    }

    /// A class called as a constructor takes whatever its `init` takes.
    pub fn arity(&self) -> usize {
        self.find_method("init").map_or(0, |init| init.arity())
    }
}

impl fmt::Debug for LoxClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

pub struct LoxInstance {
    class: Rc<LoxClass>,
    fields: HashMap<String, Value>,
}

impl LoxInstance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        LoxInstance {
            class,
            fields: HashMap::new(),
        }
    }

    pub fn class(&self) -> &Rc<LoxClass> {
        &self.class
    }

    pub fn get_field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    pub fn set_field(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }
}

// Fields may hold the instance itself; keep Debug shallow.
impl fmt::Debug for LoxInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instance", self.class.name)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }

            Value::String(s) => write!(f, "{}", s),

            Value::NativeFunction { .. } => write!(f, "<native fn>"),

            Value::Function(function) => write!(f, "<fn {}>", function.declaration.name.lexeme),

            Value::Class(class) => write!(f, "{}", class.name),

            Value::Instance(instance) => write!(f, "{} instance", instance.borrow().class().name),
        }
    }
}
