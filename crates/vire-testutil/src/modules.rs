//! Canned modules built against the bare host ABI.
//!
//! Each module imports exactly what the real compiler emits: linear memory,
//! the mutable stack-pointer global, the indirect call table, and `puti`.

use vire_core::abi;
use wasm_encoder::{
    CodeSection, EntityType, ExportKind, ExportSection, Function, FunctionSection, GlobalType,
    ImportSection, Instruction, MemArg, MemoryType, Module, RefType, TableType, TypeSection,
    ValType,
};

fn abi_imports(imports: &mut ImportSection) {
    // puti: type index 0
    imports.import(abi::IMPORT_MODULE, abi::PRINT_INT, EntityType::Function(0));
    imports.import(
        abi::IMPORT_MODULE,
        abi::LINEAR_MEMORY,
        EntityType::Memory(MemoryType {
            minimum: u64::from(abi::DEFAULT_MEMORY_PAGES),
            maximum: Some(u64::from(abi::DEFAULT_MEMORY_PAGES)),
            memory64: false,
            shared: false,
        }),
    );
    imports.import(
        abi::IMPORT_MODULE,
        abi::STACK_POINTER,
        EntityType::Global(GlobalType {
            val_type: ValType::I32,
            mutable: true,
        }),
    );
    imports.import(
        abi::IMPORT_MODULE,
        abi::INDIRECT_TABLE,
        EntityType::Table(TableType {
            element_type: RefType::FUNCREF,
            minimum: abi::DEFAULT_TABLE_INITIAL,
            maximum: None,
        }),
    );
}

fn finish(body: Function) -> Vec<u8> {
    let mut module = Module::new();

    let mut types = TypeSection::new();
    // puti: (i32) -> i32
    types.function([ValType::I32], [ValType::I32]);
    // main: () -> ()
    types.function([], []);
    module.section(&types);

    let mut imports = ImportSection::new();
    abi_imports(&mut imports);
    module.section(&imports);

    let mut functions = FunctionSection::new();
    functions.function(1);
    module.section(&functions);

    let mut exports = ExportSection::new();
    // Function index 0 is the imported puti; main is index 1.
    exports.export(abi::ENTRY_POINT, ExportKind::Func, 1);
    module.section(&exports);

    let mut code = CodeSection::new();
    code.function(&body);
    module.section(&code);

    module.finish()
}

/// A module whose `main` calls `puti(value)` once and returns.
pub fn print_module(value: i32) -> Vec<u8> {
    let mut body = Function::new(vec![]);
    body.instruction(&Instruction::I32Const(value));
    body.instruction(&Instruction::Call(0));
    body.instruction(&Instruction::Drop);
    body.instruction(&Instruction::End);
    finish(body)
}

/// A module whose `main` increments linear-memory cell 0 and prints it.
///
/// Against a fresh environment this always prints 1; a reused or shared
/// memory would print higher, which is what the isolation tests look for.
pub fn counter_module() -> Vec<u8> {
    let memarg = MemArg {
        offset: 0,
        align: 2,
        memory_index: 0,
    };
    let mut body = Function::new(vec![]);
    body.instruction(&Instruction::I32Const(0));
    body.instruction(&Instruction::I32Const(0));
    body.instruction(&Instruction::I32Load(memarg));
    body.instruction(&Instruction::I32Const(1));
    body.instruction(&Instruction::I32Add);
    body.instruction(&Instruction::I32Store(memarg));
    body.instruction(&Instruction::I32Const(0));
    body.instruction(&Instruction::I32Load(memarg));
    body.instruction(&Instruction::Call(0));
    body.instruction(&Instruction::Drop);
    body.instruction(&Instruction::End);
    finish(body)
}
