/// Units which are simply type aliases for `f32` rather than having an
/// implementation as a `uom` `Quantity`.
///
/// The sinogram binning arithmetic mixes lengths and bin counts in
/// `floor`/`ceil` expressions whose float rounding must stay bit-for-bit
/// reproducible, so the inner loop works on raw millimetres and degrees. These
/// aliases still give some clues in the source as to what they represent.

pub type Lengthf32 = f32; // mm
pub type Anglef32  = f32; // degrees
