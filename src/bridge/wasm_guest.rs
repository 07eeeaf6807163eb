// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Guest backed by a compiled core module running in wasmtime.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use wasmtime::{
    Caller, Config, Engine, Extern, ExternType, Func, Instance, Linker, Memory, Module, Store,
    TypedFunc, Val, ValType, WasmParams, WasmResults,
};

use super::guest::{Action, Guest, RawValue};
use super::host::{HostState, Trampoline, CALLBACK_FAULT};
use super::imports::{ImportBinding, ImportRole, NOW_SHIM, THROW_SHIM};
use crate::errors::{BridgeError, BridgeResult};
use crate::observability::messages::bridge::GuestInstantiated;

/// Engine for guest parsers: single 32-bit memory, no threads, no SIMD.
///
/// Fuel is deliberately left off; the bridge is synchronous and has no
/// timeout model.
pub fn create_engine() -> BridgeResult<Engine> {
    let mut config = Config::new();

    config.wasm_threads(false);
    config.wasm_relaxed_simd(false);
    config.wasm_simd(false);
    config.wasm_multi_memory(false);
    config.wasm_memory64(false);
    config.epoch_interruption(false);

    Ok(Engine::new(&config)?)
}

/// Reads a guest artifact from disk for a non-embedded binding module.
pub fn read_artifact<P: AsRef<Path>>(path: P) -> BridgeResult<Vec<u8>> {
    Ok(std::fs::read(path)?)
}

struct Exports {
    create: TypedFunc<(), i32>,
    destroy: TypedFunc<i32, ()>,
    parse: TypedFunc<(i32, i32, i32), i32>,
    alloc: TypedFunc<i32, i32>,
    dealloc: TypedFunc<(i32, i32), ()>,
    fail: TypedFunc<(i32, i32, i32, i32), ()>,
    get_values: TypedFunc<i32, i32>,
    get_offsets: TypedFunc<i32, i32>,
    get_error_description_raw: TypedFunc<i32, i64>,
    grow_offsets: Option<TypedFunc<(i32, i32), i32>>,
    reset: Option<TypedFunc<(i32, i32), ()>>,
    unary_actions: Vec<(Action, TypedFunc<i32, ()>)>,
}

pub struct WasmGuest {
    store: Store<HostState>,
    instance: Instance,
    memory: Memory,
    exports: Exports,
}

impl WasmGuest {
    /// Instantiates `bytes`, classifying each declared import by name.
    pub fn load(bytes: &[u8]) -> BridgeResult<Self> {
        let engine = create_engine()?;
        let module = Module::new(&engine, bytes)?;
        let imports: Vec<ImportBinding> = module
            .imports()
            .map(|import| ImportBinding::classify(import.module(), import.name()))
            .collect();
        Self::instantiate(&engine, &module, &imports)
    }

    /// Instantiates `bytes` with the import bindings recorded at generation time.
    pub fn new(bytes: &[u8], imports: &[ImportBinding]) -> BridgeResult<Self> {
        let engine = create_engine()?;
        let module = Module::new(&engine, bytes)?;
        Self::instantiate(&engine, &module, imports)
    }

    fn instantiate(engine: &Engine, module: &Module, imports: &[ImportBinding]) -> BridgeResult<Self> {
        let linker = build_linker(engine, module, imports)?;
        let mut store = Store::new(engine, HostState::new());
        let instance = linker.instantiate(&mut store, module)?;

        let memory = instance
            .get_memory(&mut store, "memory")
            .ok_or_else(|| BridgeError::MissingExport("memory".to_string()))?;

        let unary_actions = [Action::Finish, Action::Pause, Action::Resume, Action::Clear]
            .into_iter()
            .filter_map(|action| {
                optional_typed::<i32, ()>(&instance, &mut store, action.export_name())
                    .map(|func| func.map(|func| (action, func)))
                    .transpose()
            })
            .collect::<BridgeResult<Vec<_>>>()?;

        let exports = Exports {
            create: typed(&instance, &mut store, "create")?,
            destroy: typed(&instance, &mut store, "destroy")?,
            parse: typed(&instance, &mut store, "parse")?,
            alloc: typed(&instance, &mut store, "alloc")?,
            dealloc: typed(&instance, &mut store, "dealloc")?,
            fail: typed(&instance, &mut store, "fail")?,
            get_values: typed(&instance, &mut store, "get_values")?,
            get_offsets: typed(&instance, &mut store, "get_offsets")?,
            get_error_description_raw: typed(&instance, &mut store, "get_error_description_raw")?,
            grow_offsets: optional_typed(&instance, &mut store, "grow_offsets")?,
            reset: optional_typed(&instance, &mut store, Action::Reset.export_name())?,
            unary_actions,
        };

        tracing::info!(
            "{}",
            GuestInstantiated {
                imports: imports.len(),
                exports: module.exports().len(),
            }
        );

        Ok(Self {
            store,
            instance,
            memory,
            exports,
        })
    }

    fn export(&mut self, name: &str) -> BridgeResult<Func> {
        self.instance
            .get_func(&mut self.store, name)
            .ok_or_else(|| BridgeError::MissingExport(name.to_string()))
    }
}

fn typed<P, R>(instance: &Instance, store: &mut Store<HostState>, name: &str) -> BridgeResult<TypedFunc<P, R>>
where
    P: WasmParams,
    R: WasmResults,
{
    optional_typed(instance, store, name)?.ok_or_else(|| BridgeError::MissingExport(name.to_string()))
}

fn optional_typed<P, R>(
    instance: &Instance,
    store: &mut Store<HostState>,
    name: &str,
) -> BridgeResult<Option<TypedFunc<P, R>>>
where
    P: WasmParams,
    R: WasmResults,
{
    let Some(func) = instance.get_func(&mut *store, name) else {
        return Ok(None);
    };
    func.typed::<P, R>(&*store)
        .map(Some)
        .map_err(|e| BridgeError::ExportSignature {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn build_linker(engine: &Engine, module: &Module, imports: &[ImportBinding]) -> BridgeResult<Linker<HostState>> {
    let mut linker = Linker::new(engine);

    for import in module.imports() {
        let binding = imports
            .iter()
            .find(|binding| binding.module == import.module() && binding.name == import.name())
            .ok_or_else(|| unresolved(import.module(), import.name()))?;

        match &binding.role {
            ImportRole::Callback => {
                linker.func_wrap(
                    import.module(),
                    import.name(),
                    |mut caller: Caller<'_, HostState>, handle: i32, slot: i32, at: i32, len: i32| -> i32 {
                        let Some(Extern::Memory(memory)) = caller.get_export("memory") else {
                            return CALLBACK_FAULT;
                        };
                        let (data, host) = memory.data_and_store_mut(&mut caller);
                        host.run_callback(data, handle as u32, slot as u32, at as u32, len as u32)
                    },
                )?;
            }
            ImportRole::Logger => {
                linker.func_wrap(
                    import.module(),
                    import.name(),
                    |mut caller: Caller<'_, HostState>, raw: i64| {
                        if let Some(Extern::Memory(memory)) = caller.get_export("memory") {
                            let (data, host) = memory.data_and_store_mut(&mut caller);
                            host.log(data, raw as u64);
                        }
                    },
                )?;
            }
            ImportRole::Passthrough(host_name) if host_name == THROW_SHIM => {
                let ExternType::Func(ty) = import.ty() else {
                    return Err(unresolved(import.module(), import.name()));
                };
                linker.func_new(import.module(), import.name(), ty, |mut caller, params, _| {
                    let message = match (params.first(), params.get(1), caller.get_export("memory")) {
                        (Some(Val::I32(ptr)), Some(Val::I32(len)), Some(Extern::Memory(memory))) => {
                            let data = memory.data(&caller);
                            let start = *ptr as u32 as usize;
                            let end = start.saturating_add(*len as u32 as usize);
                            data.get(start..end)
                                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                                .unwrap_or_default()
                        }
                        _ => String::new(),
                    };
                    Err(wasmtime::Error::msg(format!("guest threw: {}", message)))
                })?;
            }
            ImportRole::Passthrough(host_name) if host_name == NOW_SHIM => {
                let ExternType::Func(ty) = import.ty() else {
                    return Err(unresolved(import.module(), import.name()));
                };
                let results: Vec<ValType> = ty.results().collect();
                match (ty.params().len(), results.as_slice()) {
                    (0, [ValType::F64]) => {
                        linker.func_wrap(import.module(), import.name(), || -> f64 { unix_millis() as f64 })?;
                    }
                    (0, [ValType::I64]) => {
                        linker.func_wrap(import.module(), import.name(), || -> i64 { unix_millis() as i64 })?;
                    }
                    _ => return Err(unresolved(import.module(), import.name())),
                };
            }
            ImportRole::Passthrough(_) => {
                return Err(unresolved(import.module(), import.name()));
            }
        }
    }

    Ok(linker)
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

fn unresolved(module: &str, name: &str) -> BridgeError {
    BridgeError::UnresolvedImport {
        module: module.to_string(),
        name: name.to_string(),
    }
}

impl Guest for WasmGuest {
    fn create(&mut self) -> BridgeResult<u32> {
        Ok(self.exports.create.call(&mut self.store, ())? as u32)
    }

    fn destroy(&mut self, handle: u32) -> BridgeResult<()> {
        Ok(self.exports.destroy.call(&mut self.store, handle as i32)?)
    }

    fn parse(&mut self, handle: u32, ptr: u32, len: u32) -> BridgeResult<u32> {
        let consumed = self
            .exports
            .parse
            .call(&mut self.store, (handle as i32, ptr as i32, len as i32))?;
        Ok(consumed.max(0) as u32)
    }

    fn alloc(&mut self, len: u32) -> BridgeResult<u32> {
        Ok(self.exports.alloc.call(&mut self.store, len as i32)? as u32)
    }

    fn dealloc(&mut self, ptr: u32, len: u32) -> BridgeResult<()> {
        Ok(self.exports.dealloc.call(&mut self.store, (ptr as i32, len as i32))?)
    }

    fn fail(&mut self, handle: u32, code: u32, ptr: u32, len: u32) -> BridgeResult<()> {
        Ok(self.exports.fail.call(
            &mut self.store,
            (handle as i32, code as i32, ptr as i32, len as i32),
        )?)
    }

    fn values_ptr(&mut self, handle: u32) -> BridgeResult<u32> {
        Ok(self.exports.get_values.call(&mut self.store, handle as i32)? as u32)
    }

    fn offsets_ptr(&mut self, handle: u32) -> BridgeResult<u32> {
        Ok(self.exports.get_offsets.call(&mut self.store, handle as i32)? as u32)
    }

    fn error_description_raw(&mut self, handle: u32) -> BridgeResult<u64> {
        Ok(self
            .exports
            .get_error_description_raw
            .call(&mut self.store, handle as i32)? as u64)
    }

    fn grow_offsets(&mut self, handle: u32, capacity: u32) -> BridgeResult<Option<u32>> {
        let Some(grow) = &self.exports.grow_offsets else {
            return Ok(None);
        };
        let ptr = grow.call(&mut self.store, (handle as i32, capacity as i32))?;
        Ok(Some(ptr as u32))
    }

    fn has_action(&self, action: Action) -> bool {
        match action {
            Action::Reset => self.exports.reset.is_some(),
            _ => self.exports.unary_actions.iter().any(|(a, _)| *a == action),
        }
    }

    fn call_action(&mut self, action: Action, handle: u32, argument: u32) -> BridgeResult<()> {
        let missing = || BridgeError::MissingExport(action.export_name().to_string());

        if action == Action::Reset {
            let reset = self.exports.reset.as_ref().ok_or_else(missing)?;
            return Ok(reset.call(&mut self.store, (handle as i32, argument as i32))?);
        }

        let (_, func) = self
            .exports
            .unary_actions
            .iter()
            .find(|(a, _)| *a == action)
            .ok_or_else(missing)?;
        Ok(func.call(&mut self.store, handle as i32)?)
    }

    fn get(&mut self, export: &str, handle: u32) -> BridgeResult<RawValue> {
        let func = self.export(export)?;
        let ty = func.ty(&self.store);
        if ty.params().len() != 1 || ty.results().len() != 1 {
            return Err(BridgeError::ExportSignature {
                name: export.to_string(),
                reason: "getters take a handle and return one value".to_string(),
            });
        }

        let mut results = [Val::I32(0)];
        func.call(&mut self.store, &[Val::I32(handle as i32)], &mut results)?;

        match &results[0] {
            Val::I32(value) => Ok(RawValue::I32(*value as u32)),
            Val::I64(value) => Ok(RawValue::I64(*value as u64)),
            other => Err(BridgeError::ExportSignature {
                name: export.to_string(),
                reason: format!("unsupported result {:?}", other.ty(&self.store)),
            }),
        }
    }

    fn set(&mut self, export: &str, handle: u32, value: RawValue) -> BridgeResult<()> {
        let func = self.export(export)?;
        let ty = func.ty(&self.store);
        let params: Vec<ValType> = ty.params().collect();

        let argument = match params.as_slice() {
            [ValType::I32, ValType::I32] => Val::I32(value.as_u32() as i32),
            [ValType::I32, ValType::I64] => Val::I64(value.as_u64() as i64),
            _ => {
                return Err(BridgeError::ExportSignature {
                    name: export.to_string(),
                    reason: "setters take a handle and one integer".to_string(),
                })
            }
        };

        func.call(&mut self.store, &[Val::I32(handle as i32), argument], &mut [])?;
        Ok(())
    }

    fn memory(&self) -> &[u8] {
        self.memory.data(&self.store)
    }

    fn memory_mut(&mut self) -> &mut [u8] {
        self.memory.data_mut(&mut self.store)
    }

    fn memory_generation(&self) -> u64 {
        self.memory.data_size(&self.store) as u64
    }

    fn host(&self) -> &HostState {
        self.store.data()
    }

    fn host_mut(&mut self) -> &mut HostState {
        self.store.data_mut()
    }

    fn split(&mut self) -> (&[u8], &mut HostState) {
        let (data, host) = self.memory.data_and_store_mut(&mut self.store);
        (data, host)
    }
}
