//! Build time diagnostics

// serial was assumed or overridden
#[cfg(curve25519_arith_backend = "serial")]
compile_error!("curve25519_arith_backend is 'serial'");

// parallel was overridden
#[cfg(curve25519_arith_backend = "parallel")]
compile_error!("curve25519_arith_backend is 'parallel'");

// 32 bits target_pointer_width was assumed or overridden
#[cfg(curve25519_arith_bits = "32")]
compile_error!("curve25519_arith_bits is '32'");

// 64 bits target_pointer_width was assumed or overridden
#[cfg(curve25519_arith_bits = "64")]
compile_error!("curve25519_arith_bits is '64'");

// lazily-built static tables are compiled in
#[cfg(feature = "precomputed-tables")]
compile_error!("precomputed-tables is enabled");
