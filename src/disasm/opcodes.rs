//! Opcode Table - static EVM opcode metadata
//!
//! Maps every byte value to its opcode definition (Shanghai/Cancun) through
//! a fixed 256-slot array built at compile time. Bytes without an assigned
//! meaning stay `None` and classify as [`OpcodeKind::Unknown`].
//!
//! Reference: https://evm.codes

/// EVM version covered by the table
pub const EVM_VERSION: &str = "Shanghai/Cancun";

/// Mnemonic reported for bytes that match no table entry
pub const UNKNOWN_MNEMONIC: &str = "UNKNOWN";

/// Description reported for bytes that match no table entry
pub const UNKNOWN_DESCRIPTION: &str = "Unknown byte (not an EVM opcode)";

const PUSH0: u8 = 0x5F;
const PUSH1: u8 = 0x60;
const PUSH32: u8 = 0x7F;

/// A single opcode definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// Byte value, also the slot index in the table
    pub byte: u8,
    /// Canonical mnemonic (e.g. "PUSH1")
    pub name: &'static str,
    /// Human-readable summary
    pub description: &'static str,
}

/// How the scanner has to treat a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpcodeKind {
    /// Recognized opcode without immediate data
    Simple,
    /// PUSH0..PUSH32, followed by `size` immediate bytes
    Push { size: usize },
    /// No table entry for this byte
    Unknown,
}

impl Opcode {
    /// Classification of this opcode (never `Unknown`)
    pub fn kind(&self) -> OpcodeKind {
        if is_push(self.byte) {
            OpcodeKind::Push {
                size: push_argument_size(self.byte),
            }
        } else {
            OpcodeKind::Simple
        }
    }
}

#[rustfmt::skip]
const DEFINITIONS: &[(u8, &str, &str)] = &[
    // 0x00: Stop and arithmetic
    (0x00, "STOP", "Halts execution"),
    (0x01, "ADD", "Addition operation"),
    (0x02, "MUL", "Multiplication operation"),
    (0x03, "SUB", "Subtraction operation"),
    (0x04, "DIV", "Integer division operation"),
    (0x05, "SDIV", "Signed integer division operation"),
    (0x06, "MOD", "Modulo remainder operation"),
    (0x07, "SMOD", "Signed modulo remainder operation"),
    (0x08, "ADDMOD", "Modulo addition operation"),
    (0x09, "MULMOD", "Modulo multiplication operation"),
    (0x0A, "EXP", "Exponential operation"),
    (0x0B, "SIGNEXTEND", "Extend length of two's complement signed integer"),
    // 0x10: Comparison and bitwise logic
    (0x10, "LT", "Less-than comparison"),
    (0x11, "GT", "Greater-than comparison"),
    (0x12, "SLT", "Signed less-than comparison"),
    (0x13, "SGT", "Signed greater-than comparison"),
    (0x14, "EQ", "Equality comparison"),
    (0x15, "ISZERO", "Simple not operator"),
    (0x16, "AND", "Bitwise AND operation"),
    (0x17, "OR", "Bitwise OR operation"),
    (0x18, "XOR", "Bitwise XOR operation"),
    (0x19, "NOT", "Bitwise NOT operation"),
    (0x1A, "BYTE", "Retrieve single byte from word"),
    (0x1B, "SHL", "Shift left operation"),
    (0x1C, "SHR", "Logical shift right operation"),
    (0x1D, "SAR", "Arithmetic shift right operation"),
    // 0x20: Hashing
    (0x20, "SHA3", "Compute Keccak-256 hash"),
    // 0x30: Environmental information
    (0x30, "ADDRESS", "Get address of currently executing account"),
    (0x31, "BALANCE", "Get balance of the given account"),
    (0x32, "ORIGIN", "Get execution origination address"),
    (0x33, "CALLER", "Get caller address"),
    (0x34, "CALLVALUE", "Get deposited value by the instruction/transaction"),
    (0x35, "CALLDATALOAD", "Get input data of current environment"),
    (0x36, "CALLDATASIZE", "Get size of input data"),
    (0x37, "CALLDATACOPY", "Copy input data to memory"),
    (0x38, "CODESIZE", "Get size of code running in current environment"),
    (0x39, "CODECOPY", "Copy code running in current environment to memory"),
    (0x3A, "GASPRICE", "Get price of gas in current environment"),
    (0x3B, "EXTCODESIZE", "Get size of an account's code"),
    (0x3C, "EXTCODECOPY", "Copy an account's code to memory"),
    (0x3D, "RETURNDATASIZE", "Get size of output data from the previous call"),
    (0x3E, "RETURNDATACOPY", "Copy output data from the previous call to memory"),
    (0x3F, "EXTCODEHASH", "Get hash of an account's code"),
    // 0x40: Block information
    (0x40, "BLOCKHASH", "Get the hash of one of the 256 most recent complete blocks"),
    (0x41, "COINBASE", "Get the block's beneficiary address"),
    (0x42, "TIMESTAMP", "Get the block's timestamp"),
    (0x43, "NUMBER", "Get the block's number"),
    (0x44, "DIFFICULTY", "Get the block's difficulty (pre-merge) or PREVRANDAO (post-merge)"),
    (0x45, "GASLIMIT", "Get the block's gas limit"),
    (0x46, "CHAINID", "Get the chain ID"),
    (0x47, "SELFBALANCE", "Get balance of currently executing account"),
    (0x48, "BASEFEE", "Get the base fee"),
    (0x49, "BLOBHASH", "Get versioned hash of a blob attached to the transaction"),
    (0x4A, "BLOBBASEFEE", "Get the current blob base fee"),
    // 0x50: Stack, memory, storage and flow
    (0x50, "POP", "Remove item from stack"),
    (0x51, "MLOAD", "Load word from memory"),
    (0x52, "MSTORE", "Save word to memory"),
    (0x53, "MSTORE8", "Save byte to memory"),
    (0x54, "SLOAD", "Load word from storage"),
    (0x55, "SSTORE", "Save word to storage"),
    (0x56, "JUMP", "Alter the program counter"),
    (0x57, "JUMPI", "Conditionally alter the program counter"),
    (0x58, "PC", "Get the value of the program counter"),
    (0x59, "MSIZE", "Get the size of active memory in bytes"),
    (0x5A, "GAS", "Get the amount of available gas"),
    (0x5B, "JUMPDEST", "Mark a valid destination for jumps"),
    (0x5C, "TLOAD", "Load word from transient storage"),
    (0x5D, "TSTORE", "Save word to transient storage"),
    (0x5E, "MCOPY", "Copy memory areas"),
    (0x5F, "PUSH0", "Place 0 on stack"),
    // 0x60-0x7F: Push operations
    (0x60, "PUSH1", "Place 1 byte item on stack"),
    (0x61, "PUSH2", "Place 2 bytes item on stack"),
    (0x62, "PUSH3", "Place 3 bytes item on stack"),
    (0x63, "PUSH4", "Place 4 bytes item on stack"),
    (0x64, "PUSH5", "Place 5 bytes item on stack"),
    (0x65, "PUSH6", "Place 6 bytes item on stack"),
    (0x66, "PUSH7", "Place 7 bytes item on stack"),
    (0x67, "PUSH8", "Place 8 bytes item on stack"),
    (0x68, "PUSH9", "Place 9 bytes item on stack"),
    (0x69, "PUSH10", "Place 10 bytes item on stack"),
    (0x6A, "PUSH11", "Place 11 bytes item on stack"),
    (0x6B, "PUSH12", "Place 12 bytes item on stack"),
    (0x6C, "PUSH13", "Place 13 bytes item on stack"),
    (0x6D, "PUSH14", "Place 14 bytes item on stack"),
    (0x6E, "PUSH15", "Place 15 bytes item on stack"),
    (0x6F, "PUSH16", "Place 16 bytes item on stack"),
    (0x70, "PUSH17", "Place 17 bytes item on stack"),
    (0x71, "PUSH18", "Place 18 bytes item on stack"),
    (0x72, "PUSH19", "Place 19 bytes item on stack"),
    (0x73, "PUSH20", "Place 20 bytes item on stack"),
    (0x74, "PUSH21", "Place 21 bytes item on stack"),
    (0x75, "PUSH22", "Place 22 bytes item on stack"),
    (0x76, "PUSH23", "Place 23 bytes item on stack"),
    (0x77, "PUSH24", "Place 24 bytes item on stack"),
    (0x78, "PUSH25", "Place 25 bytes item on stack"),
    (0x79, "PUSH26", "Place 26 bytes item on stack"),
    (0x7A, "PUSH27", "Place 27 bytes item on stack"),
    (0x7B, "PUSH28", "Place 28 bytes item on stack"),
    (0x7C, "PUSH29", "Place 29 bytes item on stack"),
    (0x7D, "PUSH30", "Place 30 bytes item on stack"),
    (0x7E, "PUSH31", "Place 31 bytes item on stack"),
    (0x7F, "PUSH32", "Place 32 bytes item on stack"),
    // 0x80: Duplication
    (0x80, "DUP1", "Duplicate 1st stack item"),
    (0x81, "DUP2", "Duplicate 2nd stack item"),
    (0x82, "DUP3", "Duplicate 3rd stack item"),
    (0x83, "DUP4", "Duplicate 4th stack item"),
    (0x84, "DUP5", "Duplicate 5th stack item"),
    (0x85, "DUP6", "Duplicate 6th stack item"),
    (0x86, "DUP7", "Duplicate 7th stack item"),
    (0x87, "DUP8", "Duplicate 8th stack item"),
    (0x88, "DUP9", "Duplicate 9th stack item"),
    (0x89, "DUP10", "Duplicate 10th stack item"),
    (0x8A, "DUP11", "Duplicate 11th stack item"),
    (0x8B, "DUP12", "Duplicate 12th stack item"),
    (0x8C, "DUP13", "Duplicate 13th stack item"),
    (0x8D, "DUP14", "Duplicate 14th stack item"),
    (0x8E, "DUP15", "Duplicate 15th stack item"),
    (0x8F, "DUP16", "Duplicate 16th stack item"),
    // 0x90: Exchange
    (0x90, "SWAP1", "Exchange 1st and 2nd stack items"),
    (0x91, "SWAP2", "Exchange 1st and 3rd stack items"),
    (0x92, "SWAP3", "Exchange 1st and 4th stack items"),
    (0x93, "SWAP4", "Exchange 1st and 5th stack items"),
    (0x94, "SWAP5", "Exchange 1st and 6th stack items"),
    (0x95, "SWAP6", "Exchange 1st and 7th stack items"),
    (0x96, "SWAP7", "Exchange 1st and 8th stack items"),
    (0x97, "SWAP8", "Exchange 1st and 9th stack items"),
    (0x98, "SWAP9", "Exchange 1st and 10th stack items"),
    (0x99, "SWAP10", "Exchange 1st and 11th stack items"),
    (0x9A, "SWAP11", "Exchange 1st and 12th stack items"),
    (0x9B, "SWAP12", "Exchange 1st and 13th stack items"),
    (0x9C, "SWAP13", "Exchange 1st and 14th stack items"),
    (0x9D, "SWAP14", "Exchange 1st and 15th stack items"),
    (0x9E, "SWAP15", "Exchange 1st and 16th stack items"),
    (0x9F, "SWAP16", "Exchange 1st and 17th stack items"),
    // 0xA0: Logging
    (0xA0, "LOG0", "Append log record with 0 topics"),
    (0xA1, "LOG1", "Append log record with 1 topic"),
    (0xA2, "LOG2", "Append log record with 2 topics"),
    (0xA3, "LOG3", "Append log record with 3 topics"),
    (0xA4, "LOG4", "Append log record with 4 topics"),
    // 0xF0: System operations
    (0xF0, "CREATE", "Create a new account with associated code"),
    (0xF1, "CALL", "Message-call into an account"),
    (0xF2, "CALLCODE", "Message-call into this account with alternative account's code"),
    (0xF3, "RETURN", "Halt execution returning output data"),
    (0xF4, "DELEGATECALL", "Message-call into this account with alternative account's code (preserving sender and value)"),
    (0xF5, "CREATE2", "Create a new account with associated code at a predictable address"),
    (0xFA, "STATICCALL", "Static message-call into an account"),
    (0xFD, "REVERT", "Halt execution reverting state changes"),
    (0xFE, "INVALID", "Designated invalid instruction"),
    (0xFF, "SELFDESTRUCT", "Halt execution and register account for later deletion"),
];

static TABLE: [Option<Opcode>; 256] = build_table();

const fn build_table() -> [Option<Opcode>; 256] {
    let mut table: [Option<Opcode>; 256] = [None; 256];
    let mut i = 0;
    while i < DEFINITIONS.len() {
        let (byte, name, description) = DEFINITIONS[i];
        assert!(table[byte as usize].is_none(), "duplicate opcode byte");
        table[byte as usize] = Some(Opcode {
            byte,
            name,
            description,
        });
        i += 1;
    }
    table
}

/// Definition for `byte`, if the table has one
pub fn lookup(byte: u8) -> Option<Opcode> {
    TABLE[byte as usize]
}

/// Case-insensitive lookup by mnemonic
pub fn lookup_name(name: &str) -> Option<Opcode> {
    iter().find(|op| op.name.eq_ignore_ascii_case(name))
}

/// Number of defined opcodes
pub fn entry_count() -> usize {
    iter().count()
}

/// All defined opcodes in byte order
pub fn iter() -> impl Iterator<Item = Opcode> {
    TABLE.iter().flatten().copied()
}

/// True for PUSH0 and PUSH1..PUSH32
pub fn is_push(byte: u8) -> bool {
    byte == PUSH0 || (PUSH1..=PUSH32).contains(&byte)
}

/// Immediate bytes consumed after the opcode: 1..32 for PUSH1..PUSH32, 0 otherwise
pub fn push_argument_size(byte: u8) -> usize {
    if (PUSH1..=PUSH32).contains(&byte) {
        (byte - PUSH0) as usize
    } else {
        0
    }
}

/// Tagged classification used by the scanner
pub fn classify(byte: u8) -> OpcodeKind {
    lookup(byte).map_or(OpcodeKind::Unknown, |op| op.kind())
}
