//! Prompt templates. The formatting rules inside them are instructions to
//! the model; nothing downstream parses or enforces them.

pub fn answer_prompt(question: &str, context: &str) -> String {
    format!(
        "You are an advanced AI research assistant. Your goal is to provide a comprehensive, structured, and visually appealing answer to the user's question based on the search results provided below.\n\n\
         **Instructions:**\n\
         1. **Structure:** Organize your response into clear sections with bold headings (e.g., **Overview**, **Key Details**, **Implications**).\n\
         2. **Formatting:** Use bullet points for readability. Use **bold** text for key terms or important figures.\n\
         3. **Citations:** You MUST cite your sources. Use inline citations like [1], [2] at the end of sentences.\n\
         4. **Sources Section:** At the very end, include a '***' separator followed by a '### Sources' section listing the numbered sources with their titles and URLs (e.g., [1] [Title](URL)).\n\
         5. **Tone:** Professional, objective, and direct. Like a high-quality research summary.\n\
         6. **Synthesize:** Do not just list results. Combine information from multiple sources to tell a coherent story.\n\n\
         **User Question:** {question}\n\n\
         **Search Results (Context):**\n{context}"
    )
}

/// Mermaid flowchart request. The model is told to start with `graph TD`.
pub fn diagram_prompt(topic: &str) -> String {
    format!(
        "Create a detailed Mermaid.js flowchart (graph TD) that represents the structure, key concepts, and relationships for the topic: '{topic}'.\n\
         Requirements:\n\
         1. Use 'graph TD' (top-down) orientation.\n\
         2. Every node MUST have a unique ID followed by its label in brackets. \n   \
         - Use [brackets] for rectangles: ID[Label]\n   \
         - Use (parens) for rounded nodes: ID(Label)\n   \
         - Use {{braces}} for diamonds: ID{{Label}}\n\
         3. If a label contains special characters like '&', parentheses, or quotes, wrap the WHOLE label in double quotes inside the brackets. Example: A[\"Label with & symbol\"]\n\
         4. Ensure all connections use '-->' and are logically structured.\n\
         5. STRICT OUTPUT FORMAT: Return ONLY the Mermaid code. No markdown code blocks. No 'Here is the graph'. No explanations. Start the response with 'graph TD'.\n"
    )
}

pub fn summary_prompt(text: &str) -> String {
    format!(
        "Please analyze the following text and provide a concise, high-level summary that captures the main points:\n\n{text}"
    )
}
