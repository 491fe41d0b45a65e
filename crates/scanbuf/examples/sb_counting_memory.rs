// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Observing when a `ScanBuf` touches the heap.
//!
//! 1. We render short and long records into a buffer backed by stack scratch space.
//! 2. Short records fit in the scratch space, long ones spill to the heap.
//! 3. After each record we free the buffer so the next one starts in scratch space again.
//! 4. We print how many times the memory provider was asked for memory.

use std::fmt::Write;

use scanbuf::mem::testing::CountingMemory;
use scanbuf::{ByteView, Memory, Ownership, ScanBuf};

fn main() {
    let memory = CountingMemory::new();
    let mut scratch = [0_u8; 64];

    let mut buf = ScanBuf::with_storage_in(&mut scratch, &memory);

    for field_count in [2, 3, 40, 1] {
        render_record(&mut buf, field_count);

        let location = match buf.ownership() {
            Ownership::CallerOwned => "scratch space",
            Ownership::HeapOwned => "heap",
        };

        println!(
            "Rendered {field_count} fields into {} bytes of {location} (capacity {}).",
            buf.len(),
            buf.capacity()
        );

        summarize(buf.contents());

        buf.free();
    }

    drop(buf);

    println!(
        "Memory provider: {} allocations, {} reallocations, {} releases, capacities {:?}.",
        memory.allocations(),
        memory.reallocations(),
        memory.releases(),
        memory.requested_capacities()
    );
}

fn render_record<M: Memory>(buf: &mut ScanBuf<'_, M>, field_count: usize) {
    buf.put_byte(b'{');

    for index in 0..field_count {
        if index > 0 {
            buf.put_byte(b',');
        }

        write!(buf, "\"f{index}\":{}", index * 7).expect("writing to a ScanBuf never fails");
    }

    buf.put_byte(b'}');
}

fn summarize(mut record: ByteView<'_>) {
    let mut fields = 0;

    while !record.is_empty() {
        record.consume_while(|b| b != b'"');

        if record.consume_prefix("\"f") {
            fields += 1;
        } else {
            record.consume_byte();
        }
    }

    println!("Parsed back {fields} fields.");
}
