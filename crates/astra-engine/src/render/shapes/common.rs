//! GPU types and helpers shared by shape renderers.

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Viewport};

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) fn new(viewport: Viewport) -> Self {
        Self { viewport: [viewport.width.max(1.0), viewport.height.max(1.0)], _pad: [0.0; 2] }
    }

    /// Minimum binding size for the uniform buffer.
    pub(super) fn binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(std::mem::size_of::<Self>() as u64)
            .expect("ViewportUniform has non-zero size by construction")
    }
}

/// Converts a logical-pixel clip rect to a physical scissor `(x, y, w, h)`.
///
/// `None` clip means the full viewport. Returns `None` when the resulting
/// scissor is zero-area, in which case the draw is skipped.
pub(super) fn logical_clip_to_scissor(
    clip: Option<Rect>,
    viewport: Viewport,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let phys_w = (viewport.width * scale).max(1.0) as u32;
    let phys_h = (viewport.height * scale).max(1.0) as u32;

    let (x, y, w, h) = match clip {
        None => (0, 0, phys_w, phys_h),
        Some(r) => {
            let to_px = |v: f32, max: u32| ((v * scale).max(0.0) as u32).min(max);
            let x0 = to_px(r.origin.x, phys_w);
            let y0 = to_px(r.origin.y, phys_h);
            let x1 = to_px(r.origin.x + r.size.x, phys_w);
            let y1 = to_px(r.origin.y + r.size.y, phys_h);
            (x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
        }
    };

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}
