#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # CSV to Sheet for Rust

 Write the records produced by the `csv` serializer into the cells of an Excel
 workbook instead of a text stream. The heavy lifting of the file format is left
 to [`rust_xlsxwriter`](https://docs.rs/rust_xlsxwriter); this crate only decides
 which cell each field goes to and when the workbook is saved.

 ## Core Concepts

- **ItemWriter:** the output side of an export, receiving items one chunk at a time.
- **XlsxItemWriter:** an `ItemWriter` that places each record on its own row,
  one field per column, starting at the top-left corner of a target range.
- **Row cursor and offsets:** the cursor starts at 1 and moves down one row per
  record; row and column offsets shift every record written after they change.
- **Close:** saves a workbook the writer created to its path or stream, exactly once.

 ## Features

| **Feature** | **Description**                                       |
|-------------|-------------------------------------------------------|
| xlsx        | Enables the Excel `ItemWriter` (enabled by default)   |
| full        | Enables all available features                        |

 ## Getting Started

```rust
# use csv_sheet_rs::{core::item::ItemWriter, item::xlsx::XlsxItemWriterBuilder, SheetError};
# use serde::Serialize;
# use std::env::temp_dir;
#[derive(Serialize)]
struct Car {
    year: u16,
    make: String,
    model: String,
}

fn main() -> Result<(), SheetError> {
    let cars = vec![
        Car { year: 1948, make: "Porsche".to_string(), model: "356".to_string() },
        Car { year: 1995, make: "Peugeot".to_string(), model: "205".to_string() },
    ];

    let writer = XlsxItemWriterBuilder::new()
        .has_headers(true)
        .sheet_name("Cars")
        .from_path(temp_dir().join("cars.xlsx"))?;

    writer.write(cars.as_slice())?;
    writer.close()?;

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Core writer abstraction
pub mod core;

/// Error types for sheet writers
pub mod error;

#[doc(inline)]
pub use error::*;

/// Set of item writers (for example: the Excel writer)
pub mod item;
