//! Option storage and name lookup.
//!
//! Descriptors live in one arena per kind and are never removed. The short
//! and long maps hold [`Slot`]s into those arenas, so the maps and every
//! caller-held handle resolve through the same storage. Registering a key
//! that is already bound rebinds it; the previous descriptor keeps its
//! state and stays readable through its handle, but no longer receives
//! effects through that key.

use indexmap::IndexMap;
use plusopt_metadata::{OptionDecl, OptionKind};

use crate::descriptor::{Counter, Descriptor, Effect, Flag, MultiArg, Names, SingleArg};

/// Untyped reference to a registered option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Flag(usize),
    SingleArg(usize),
    MultiArg(usize),
    Counter(usize),
}

macro_rules! typed_id {
    ($(#[$doc:meta])* $name:ident => $variant:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(usize);

        impl From<$name> for Slot {
            fn from(id: $name) -> Self {
                Slot::$variant(id.0)
            }
        }
    };
}

typed_id!(
    /// Handle returned by [`Registry::new_flag`].
    FlagId => Flag
);
typed_id!(
    /// Handle returned by [`Registry::new_single_arg`].
    SingleArgId => SingleArg
);
typed_id!(
    /// Handle returned by [`Registry::new_multi_arg`].
    MultiArgId => MultiArg
);
typed_id!(
    /// Handle returned by [`Registry::new_counter`].
    CounterId => Counter
);

/// Owns every descriptor and maps short characters and long names to them.
///
/// Accessors taking a handle panic if the handle was issued by a different
/// registry.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    flags: Vec<Flag>,
    single_args: Vec<SingleArg>,
    multi_args: Vec<MultiArg>,
    counters: Vec<Counter>,
    by_short: IndexMap<char, Slot>,
    by_long: IndexMap<String, Slot>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_flag(&mut self, short: char, long: &str, help: &str) -> FlagId {
        let id = FlagId(self.flags.len());
        self.flags.push(Flag::new(Names::new(short, long, help)));
        self.bind(id.into(), short, long);
        id
    }

    pub fn new_single_arg(&mut self, short: char, long: &str, help: &str) -> SingleArgId {
        let id = SingleArgId(self.single_args.len());
        self.single_args
            .push(SingleArg::new(Names::new(short, long, help)));
        self.bind(id.into(), short, long);
        id
    }

    pub fn new_multi_arg(&mut self, short: char, long: &str, help: &str) -> MultiArgId {
        let id = MultiArgId(self.multi_args.len());
        self.multi_args
            .push(MultiArg::new(Names::new(short, long, help)));
        self.bind(id.into(), short, long);
        id
    }

    pub fn new_counter(&mut self, short: char, long: &str, help: &str) -> CounterId {
        let id = CounterId(self.counters.len());
        self.counters.push(Counter::new(Names::new(short, long, help)));
        self.bind(id.into(), short, long);
        id
    }

    /// Register an option from a declaration.
    pub fn register(&mut self, decl: &OptionDecl) -> Slot {
        let (short, long, help) = (decl.short, decl.long.as_str(), decl.help.as_str());
        match decl.kind {
            OptionKind::Flag => self.new_flag(short, long, help).into(),
            OptionKind::SingleArg => self.new_single_arg(short, long, help).into(),
            OptionKind::MultiArg => self.new_multi_arg(short, long, help).into(),
            OptionKind::Counter => self.new_counter(short, long, help).into(),
        }
    }

    fn bind(&mut self, slot: Slot, short: char, long: &str) {
        if let Some(prev) = self.by_short.insert(short, slot) {
            tracing::debug!(short = %short, ?prev, "short option re-registered; previous option shadowed");
        }
        if let Some(prev) = self.by_long.insert(long.to_string(), slot) {
            tracing::debug!(long, ?prev, "long option re-registered; previous option shadowed");
        }
    }

    pub fn lookup_short(&self, short: char) -> Option<Slot> {
        self.by_short.get(&short).copied()
    }

    pub fn lookup_long(&self, long: &str) -> Option<Slot> {
        self.by_long.get(long).copied()
    }

    pub fn flag(&self, id: FlagId) -> &Flag {
        &self.flags[id.0]
    }

    pub fn single_arg(&self, id: SingleArgId) -> &SingleArg {
        &self.single_args[id.0]
    }

    pub fn multi_arg(&self, id: MultiArgId) -> &MultiArg {
        &self.multi_args[id.0]
    }

    pub fn counter(&self, id: CounterId) -> &Counter {
        &self.counters[id.0]
    }

    pub fn descriptor(&self, slot: Slot) -> &dyn Descriptor {
        match slot {
            Slot::Flag(i) => &self.flags[i],
            Slot::SingleArg(i) => &self.single_args[i],
            Slot::MultiArg(i) => &self.multi_args[i],
            Slot::Counter(i) => &self.counters[i],
        }
    }

    pub(crate) fn effect_mut(&mut self, slot: Slot) -> &mut dyn Effect {
        match slot {
            Slot::Flag(i) => &mut self.flags[i],
            Slot::SingleArg(i) => &mut self.single_args[i],
            Slot::MultiArg(i) => &mut self.multi_args[i],
            Slot::Counter(i) => &mut self.counters[i],
        }
    }

    /// Whether `handle` is still bound to its short character.
    pub fn owns_short(&self, handle: impl Into<Slot>) -> bool {
        let slot = handle.into();
        self.lookup_short(self.descriptor(slot).short()) == Some(slot)
    }

    /// Whether `handle` is still bound to its long name.
    pub fn owns_long(&self, handle: impl Into<Slot>) -> bool {
        let slot = handle.into();
        self.lookup_long(self.descriptor(slot).long()) == Some(slot)
    }

    /// Whether a token can still reach `handle` by its short or long name.
    ///
    /// False once both keys have been re-registered to other options; the
    /// handle then reads frozen state.
    pub fn is_reachable(&self, handle: impl Into<Slot>) -> bool {
        let slot = handle.into();
        self.owns_short(slot) || self.owns_long(slot)
    }

    /// Reachable options: long-name registration order first, then options
    /// reachable only through their short character.
    pub fn reachable(&self) -> Vec<Slot> {
        let mut out: Vec<Slot> = Vec::with_capacity(self.by_long.len());
        for slot in self.by_long.values().chain(self.by_short.values()) {
            if !out.contains(slot) {
                out.push(*slot);
            }
        }
        out
    }
}
